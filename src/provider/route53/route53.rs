use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::provider::{ChangeInfo, Provider};
use crate::record::ProviderRecord;

use super::restful_cli::R53Client;
use super::serializer::ChangeResourceRecordSetsRequest;

pub const DEFAULT_ENDPOINT: &str = "https://route53.amazonaws.com";

const ZONE_ID_PREFIX: &str = "/hostedzone/";

/// Static AWS key pair. There is no session token and no credential chain.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

pub struct Route53 {
    zone_id: String,
    cli: R53Client,
}

impl Route53 {
    pub fn new(credentials: Credentials, hosted_zone_id: &str) -> Result<Self> {
        Self::with_endpoint(credentials, hosted_zone_id, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(
        credentials: Credentials,
        hosted_zone_id: &str,
        endpoint: &str,
    ) -> Result<Self> {
        Ok(Self {
            zone_id: Self::normalize_zone_id(hosted_zone_id),
            cli: R53Client::new(credentials, endpoint)?,
        })
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Accepts both `Z123` and the console's `/hostedzone/Z123`.
    fn normalize_zone_id(id: &str) -> String {
        let id = id.trim();
        id.strip_prefix(ZONE_ID_PREFIX).unwrap_or(id).to_string()
    }
}

#[async_trait]
impl Provider for Route53 {
    async fn upsert(&self, record: &ProviderRecord) -> Result<ChangeInfo> {
        let request = ChangeResourceRecordSetsRequest::upsert(record);
        self.cli
            .change_resource_record_sets(&self.zone_id, &request)
            .await
    }
}
