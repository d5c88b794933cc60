//! Destination resolution from per-session metadata records.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use crate::config::{RetrieverConfig, VIDEO_DOWNLOAD_ENDPOINT};
use crate::engine::transfer::prune_stale_artifacts;
use crate::error::{MetadataError, ResolveError};

/// A test runner's declared destination for one session's video.
///
/// Written by the test-execution side before the session ends. This crate
/// only ever reads these records.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "OutputDir")]
    pub output_dir: PathBuf,
    #[serde(rename = "OutputFile")]
    pub output_file: String,
}

/// Resolves where a session's video should land on the hub.
pub struct DestinationResolver {
    metadata_dir: PathBuf,
    max_artifact_age: Duration,
}

impl DestinationResolver {
    pub fn new(config: &RetrieverConfig) -> Self {
        Self {
            metadata_dir: config.metadata_dir.clone(),
            max_artifact_age: config.max_artifact_age(),
        }
    }

    /// Resolve the final destination for `session`, falling back to
    /// `default_dest` when the session has no usable metadata record.
    ///
    /// A missing or corrupt record is never fatal. The video still lands
    /// at the default path.
    pub async fn resolve(
        &self,
        session: &str,
        default_dest: &Path,
    ) -> Result<PathBuf, ResolveError> {
        match self.read_metadata(session).await {
            Ok(Some(meta)) => {
                fs::create_dir_all(&meta.output_dir).await.map_err(|e| {
                    ResolveError::CreateDir {
                        dir: meta.output_dir.clone(),
                        source: e,
                    }
                })?;
                prune_stale_artifacts(&meta.output_dir, self.max_artifact_age).await;
                let dest = meta.output_dir.join(&meta.output_file);
                info!(
                    "session {} has declared destination {}",
                    session,
                    dest.display()
                );
                Ok(dest)
            }
            Ok(None) => {
                info!(
                    "no metadata record for session {}, using default destination {}",
                    session,
                    default_dest.display()
                );
                Ok(default_dest.to_path_buf())
            }
            Err(e) => {
                warn!(
                    "metadata record for session {} unusable, using default destination: {}",
                    session, e
                );
                Ok(default_dest.to_path_buf())
            }
        }
    }

    async fn read_metadata(&self, session: &str) -> Result<Option<SessionMetadata>, MetadataError> {
        let path = self.metadata_dir.join(format!("{}.json", session));
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(MetadataError::Read { path, source: e }),
        };
        let meta =
            serde_json::from_slice(&raw).map_err(|e| MetadataError::Parse { path, source: e })?;
        Ok(Some(meta))
    }
}

/// Default hub-side destination when a session has no metadata record.
///
/// The filename is the download URL's path with the download prefix and any
/// remaining separators stripped, so nested node paths collapse to one flat
/// name under the hub output directory.
pub fn default_destination(hub_dir: &Path, session: &str, download_url: &str) -> PathBuf {
    let raw_path = match reqwest::Url::parse(download_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => download_url.to_string(),
    };
    let name = raw_path.replace(VIDEO_DOWNLOAD_ENDPOINT, "").replace('/', "");
    if name.is_empty() {
        hub_dir.join(format!("{}.mp4", session))
    } else {
        hub_dir.join(name)
    }
}
