use crate::error::Result;

use async_trait::async_trait;

/// Source of the host's public (WAN) address.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}
