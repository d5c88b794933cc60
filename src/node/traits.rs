use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{PollError, TransferError};
use crate::node::snapshot::StatusSnapshot;

#[async_trait]
pub trait VideoNode: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusSnapshot, PollError>;
    async fn fetch_video(&self, url: &str) -> Result<Bytes, TransferError>;
}
