//! Pure decision logic over one status snapshot.

use crate::node::snapshot::{StatusSnapshot, VideoDescriptor};

/// What a single status snapshot says about one session's video.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    /// The node is still recording or rendering this session's video.
    InProgress,
    /// A finished file is ready for download.
    Available(VideoDescriptor),
    /// The snapshot does not mention the session at all.
    Unavailable,
}

/// Classify `session` against one snapshot.
///
/// A snapshot missing either field is malformed and reports nothing as
/// available. A session listed as in progress stays `InProgress` even if a
/// finished entry also exists, so a task never downloads a file the node is
/// still writing.
pub fn video_availability(snapshot: &StatusSnapshot, session: &str) -> Availability {
    let (current, available) = match (&snapshot.current_videos, &snapshot.available_videos) {
        (Some(current), Some(available)) => (current, available),
        _ => return Availability::Unavailable,
    };
    if current.iter().any(|s| s == session) {
        return Availability::InProgress;
    }
    if let Some(desc) = available.get(session) {
        return Availability::Available(desc.clone());
    }
    Availability::Unavailable
}
