//! Retrieves test-session video recordings from grid nodes onto the hub.
//!
//! A node records each test session and reports finished videos on its
//! extras API. A [`RetrievalTask`] polls that API with a bounded number of
//! attempts until the session's video is ready, then resolves the hub-side
//! destination from per-session metadata and downloads the file into place.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod engine;
pub mod error;
pub mod node;

pub use config::RetrieverConfig;
pub use engine::decision::{video_availability, Availability};
pub use engine::resolver::{default_destination, DestinationResolver, SessionMetadata};
pub use engine::retriever::RetrievalTask;
pub use engine::transfer::{prune_stale_artifacts, FileTransfer, SourceLocator};
pub use error::{MetadataError, PollError, ResolveError, RetrievalError, TransferError};
pub use node::http_node::HttpVideoNode;
pub use node::snapshot::{StatusSnapshot, VideoDescriptor};
pub use node::traits::VideoNode;

static INIT_TRACING: Once = Once::new();

/// Install the tracing subscriber once for the whole process.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        info!("video retriever tracing initialized");
    });
}
