use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// TCP port a node's extras API listens on.
pub const STATUS_PORT: u16 = 3000;

/// Path of the video status endpoint on a node.
pub const VIDEO_STATUS_ENDPOINT: &str = "/video";

/// Path prefix under which a node serves finished video files.
pub const VIDEO_DOWNLOAD_ENDPOINT: &str = "/download_video";

/// Top-level configuration for the retrieval pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieverConfig {
    /// Directory on the hub where retrieved videos land when a session has
    /// no metadata record.
    pub video_output_dir: PathBuf,
    /// Directory holding one `<session>.json` metadata record per test session.
    pub metadata_dir: PathBuf,
    /// Per-request timeout for status polls against a node, in seconds.
    pub http_timeout_secs: u64,
    /// Per-request timeout for a whole video download, in seconds. Sized
    /// for full recordings, not status bodies.
    pub download_timeout_secs: u64,
    /// Maximum number of status poll attempts per retrieval task.
    pub max_attempts: u32,
    /// Fixed delay between non-terminal attempts, in seconds.
    pub attempt_delay_secs: u64,
    /// Age beyond which stale artifacts in an output directory are pruned,
    /// in seconds.
    pub max_artifact_age_secs: u64,
}

impl RetrieverConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn attempt_delay(&self) -> Duration {
        Duration::from_secs(self.attempt_delay_secs)
    }

    pub fn max_artifact_age(&self) -> Duration {
        Duration::from_secs(self.max_artifact_age_secs)
    }
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            video_output_dir: PathBuf::from("video_output"),
            metadata_dir: PathBuf::from("test_json"),
            http_timeout_secs: 10,
            download_timeout_secs: 300,
            max_attempts: 5,
            attempt_delay_secs: 30,
            max_artifact_age_secs: 48 * 60 * 60,
        }
    }
}
