//! Error types for the retrieval pipeline, split by stage so callers can
//! tell a failed poll from a failed transfer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while polling a node's video status endpoint.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("status request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("status response from {url} was not valid json")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while reading a session's metadata record.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata record {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("metadata record {path} was not valid json")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure while resolving a session's destination path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to create output directory {dir}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while moving video bytes to their destination.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("download from {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read source file {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create destination directory {dir}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move finished file into place at {dest}")]
    Rename {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Terminal outcome of a retrieval task that never produced a file.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to retrieve video for session {session} from host {host} after {attempts} attempts")]
    AttemptsExhausted {
        session: String,
        host: String,
        attempts: u32,
    },
}
