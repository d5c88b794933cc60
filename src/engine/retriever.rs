//! Retrieval task: a bounded polling loop that drives one session's video
//! from its node onto the hub.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::RetrieverConfig;
use crate::engine::decision::{video_availability, Availability};
use crate::engine::resolver::{default_destination, DestinationResolver};
use crate::engine::transfer::{FileTransfer, SourceLocator};
use crate::error::RetrievalError;
use crate::node::http_node::HttpVideoNode;
use crate::node::snapshot::VideoDescriptor;
use crate::node::traits::VideoNode;

/// One session's retrieval, from first poll to terminal result.
///
/// Tasks are independent: each owns its node client, resolver, and transfer,
/// and shares nothing with tasks for other sessions.
pub struct RetrievalTask {
    session: String,
    host: String,
    node: Arc<dyn VideoNode>,
    resolver: DestinationResolver,
    transfer: FileTransfer,
    config: RetrieverConfig,
}

impl RetrievalTask {
    /// Set up a task that polls `host` for `session`'s video.
    pub fn new(session: String, host: String, config: RetrieverConfig) -> Self {
        let node = Arc::new(HttpVideoNode::new(&host, &config));
        Self::with_node(session, host, node, config)
    }

    /// Same as `new`, but against a caller-supplied node client.
    pub fn with_node(
        session: String,
        host: String,
        node: Arc<dyn VideoNode>,
        config: RetrieverConfig,
    ) -> Self {
        info!(
            "retrieval task created for session {} on host {}",
            session, host
        );
        let resolver = DestinationResolver::new(&config);
        let transfer = FileTransfer::new(Arc::clone(&node), &config);
        Self {
            session,
            host,
            node,
            resolver,
            transfer,
            config,
        }
    }

    /// Run the task on its own tokio task.
    pub fn spawn(self) -> JoinHandle<Result<PathBuf, RetrievalError>> {
        tokio::spawn(self.run())
    }

    /// Poll until the video lands or attempts run out.
    ///
    /// Every non-terminal outcome consumes one attempt: transport and parse
    /// failures, a still-recording video, a session the host does not report
    /// yet, and transfer failures all fall through to the next attempt after
    /// the fixed delay.
    pub async fn run(self) -> Result<PathBuf, RetrievalError> {
        let max_attempts = self.config.max_attempts;
        for attempt in 1..=max_attempts {
            info!(
                "session {} attempt {} of {}",
                self.session, attempt, max_attempts
            );
            if let Some(path) = self.attempt().await {
                info!(
                    "session {} video retrieved to {}",
                    self.session,
                    path.display()
                );
                return Ok(path);
            }
            if attempt < max_attempts {
                debug!(
                    "session {} waiting {}s before next attempt",
                    self.session, self.config.attempt_delay_secs
                );
                sleep(self.config.attempt_delay()).await;
            }
        }

        warn!(
            "session {} video not retrieved from {} after {} attempts",
            self.session, self.host, max_attempts
        );
        Err(RetrievalError::AttemptsExhausted {
            session: self.session,
            host: self.host,
            attempts: max_attempts,
        })
    }

    /// One poll-decide-transfer attempt. `None` means try again.
    async fn attempt(&self) -> Option<PathBuf> {
        let snapshot = match self.node.fetch_status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("session {} status poll failed: {}", self.session, e);
                return None;
            }
        };

        match video_availability(&snapshot, &self.session) {
            Availability::InProgress => {
                info!(
                    "session {} video still recording or rendering",
                    self.session
                );
                None
            }
            Availability::Unavailable => {
                // A node can report a finished session late, so an unknown
                // session keeps retrying instead of failing fast.
                warn!(
                    "session {} not reported by host {} yet",
                    self.session, self.host
                );
                None
            }
            Availability::Available(descriptor) => self.retrieve_available(&descriptor).await,
        }
    }

    async fn retrieve_available(&self, descriptor: &VideoDescriptor) -> Option<PathBuf> {
        let default_dest = default_destination(
            &self.config.video_output_dir,
            &self.session,
            &descriptor.download_url,
        );
        let dest = match self.resolver.resolve(&self.session, &default_dest).await {
            Ok(dest) => dest,
            Err(e) => {
                warn!("session {} destination not usable: {}", self.session, e);
                return None;
            }
        };

        let source = SourceLocator::classify(&descriptor.download_url);
        match self.transfer.transfer(&source, &dest).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("session {} transfer failed: {}", self.session, e);
                None
            }
        }
    }
}
