//! Byte transfer into a resolved destination.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::RetrieverConfig;
use crate::error::TransferError;
use crate::node::traits::VideoNode;

/// Where a video's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// Download over HTTP from the node.
    Remote(String),
    /// Copy from a path reachable on this filesystem, when hub and node
    /// share storage.
    Local(PathBuf),
}

impl SourceLocator {
    pub fn classify(locator: &str) -> Self {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            SourceLocator::Remote(locator.to_string())
        } else {
            SourceLocator::Local(PathBuf::from(locator))
        }
    }
}

/// Moves video bytes into place without ever exposing a partial file
/// under the final name.
pub struct FileTransfer {
    node: Arc<dyn VideoNode>,
    max_artifact_age: Duration,
}

impl FileTransfer {
    pub fn new(node: Arc<dyn VideoNode>, config: &RetrieverConfig) -> Self {
        Self {
            node,
            max_artifact_age: config.max_artifact_age(),
        }
    }

    /// Fetch or copy the source into `dest`.
    ///
    /// The destination directory is created if missing and pruned of stale
    /// artifacts first. Bytes land under a `.part` name and are renamed
    /// into place only once fully written.
    pub async fn transfer(
        &self,
        source: &SourceLocator,
        dest: &Path,
    ) -> Result<PathBuf, TransferError> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TransferError::CreateDir {
                        dir: parent.to_path_buf(),
                        source: e,
                    })?;
                prune_stale_artifacts(parent, self.max_artifact_age).await;
            }
        }

        let bytes = match source {
            SourceLocator::Remote(url) => self.node.fetch_video(url).await?,
            SourceLocator::Local(path) => {
                let raw = fs::read(path).await.map_err(|e| TransferError::SourceRead {
                    path: path.clone(),
                    source: e,
                })?;
                Bytes::from(raw)
            }
        };

        let partial = partial_path(dest);
        if let Err(e) = fs::write(&partial, &bytes).await {
            let _ = fs::remove_file(&partial).await;
            return Err(TransferError::Write {
                path: partial,
                source: e,
            });
        }
        if let Err(e) = fs::rename(&partial, dest).await {
            let _ = fs::remove_file(&partial).await;
            return Err(TransferError::Rename {
                dest: dest.to_path_buf(),
                source: e,
            });
        }

        info!("transferred {} bytes to {}", bytes.len(), dest.display());
        Ok(dest.to_path_buf())
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut tmp = dest.as_os_str().to_os_string();
    tmp.push(".part");
    PathBuf::from(tmp)
}

/// Remove regular files in `dir` whose modification time is older than
/// `max_age`. Best effort: scan and per-file failures are logged, never
/// returned, so retention can never block a retrieval.
pub async fn prune_stale_artifacts(dir: &Path, max_age: Duration) {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot scan {} for stale artifacts: {}", dir.display(), e);
            return;
        }
    };

    let now = SystemTime::now();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(
                    "stale artifact scan of {} stopped early: {}",
                    dir.display(),
                    e
                );
                break;
            }
        };
        let path = entry.path();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => {}
            _ => continue,
        }
        let age = entry
            .metadata()
            .await
            .ok()
            .and_then(|m| m.modified().ok())
            .and_then(|t| now.duration_since(t).ok())
            .unwrap_or(Duration::ZERO);
        if age > max_age {
            match fs::remove_file(&path).await {
                Ok(()) => debug!("pruned stale artifact {}", path.display()),
                Err(e) => warn!("failed to prune {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_locators_are_remote() {
        assert_eq!(
            SourceLocator::classify("http://node:3000/download_video/s1.mp4"),
            SourceLocator::Remote("http://node:3000/download_video/s1.mp4".to_string())
        );
        assert_eq!(
            SourceLocator::classify("https://node/s1.mp4"),
            SourceLocator::Remote("https://node/s1.mp4".to_string())
        );
    }

    #[test]
    fn bare_paths_are_local() {
        assert_eq!(
            SourceLocator::classify("/var/videos/s1.mp4"),
            SourceLocator::Local(PathBuf::from("/var/videos/s1.mp4"))
        );
    }

    #[test]
    fn partial_name_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("out/s1.mp4")),
            PathBuf::from("out/s1.mp4.part")
        );
    }
}
