// Node access: status polling and video download against a grid node.

pub mod http_node;
pub mod snapshot;
pub mod traits;
