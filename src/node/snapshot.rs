//! Wire types for the video status endpoint.

use std::collections::HashMap;

use serde::Deserialize;

/// One attempt's view of a node's recording state.
///
/// Both fields are optional on the wire. A node that has never recorded
/// anything, or an older node build, may omit either one; decoding still
/// succeeds and the decision layer classifies such a snapshot as reporting
/// nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSnapshot {
    /// Sessions with a recording still in progress on the node.
    pub current_videos: Option<Vec<String>>,
    /// Finished videos keyed by session id.
    pub available_videos: Option<HashMap<String, VideoDescriptor>>,
}

/// A finished video as described by the node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoDescriptor {
    /// URL the file can be downloaded from.
    #[serde(rename = "video_download_url")]
    pub download_url: String,
    /// Absolute path of the file on the node itself, when reported.
    #[serde(rename = "video_absolute_path", default)]
    pub absolute_path: Option<String>,
}
