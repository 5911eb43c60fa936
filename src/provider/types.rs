use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::ProviderRecord;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Creates the record, or replaces it if one with the same name and type
    /// already exists.
    async fn upsert(&self, record: &ProviderRecord) -> Result<ChangeInfo>;
}

/// Provider acknowledgement of a submitted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    pub id: String,
    pub status: String,
    pub submitted_at: Option<String>,
}

impl fmt::Display for ChangeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "change {} is {}", self.id, self.status)?;
        if let Some(at) = &self.submitted_at {
            write!(f, " (submitted at {})", at)?;
        }
        Ok(())
    }
}
