use std::time::Duration;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::provider::ChangeInfo;
use crate::wrapper::http::{Client, Header, HeaderKey, Response};

use super::route53::Credentials;
use super::serializer::{ChangeResourceRecordSetsRequest, ChangeResourceRecordSetsResponse, ErrorResponse};
use super::signer::{Request, Signer};

const API_VERSION: &str = "2013-04-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) struct R53Client {
    credentials: Credentials,
    endpoint: String,
    host: String,
    cli: Client,
}

impl R53Client {
    pub fn new(credentials: Credentials, endpoint: &str) -> Result<Self> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| Error::ConfigError(format!("invalid route53 endpoint {}: {}", endpoint, e)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(Error::ConfigError(format!(
                    "route53 endpoint {} has no host",
                    endpoint
                )));
            }
        };

        let mut cli = Client::with_timeout(REQUEST_TIMEOUT)?;
        cli.set_default_headers(vec![Header::new(
            HeaderKey::ContentType,
            "application/xml".to_string(),
        )]);

        Ok(Self {
            credentials,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            host,
            cli,
        })
    }

    async fn post(&self, path: &str, body: String) -> Result<Response> {
        let signature = Signer::new(&self.credentials).sign(
            &Request {
                method: "POST",
                uri: path,
                host: &self.host,
                payload: &body,
            },
            Utc::now(),
        );

        let headers = vec![
            Header::new(HeaderKey::Authorization, signature.authorization),
            Header::new(HeaderKey::AmzDate, signature.amz_date),
        ];

        let url = format!("{}{}", self.endpoint, path);
        self.cli.post(&url, Some(headers), body).await
    }
}

impl R53Client {
    pub async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        request: &ChangeResourceRecordSetsRequest,
    ) -> Result<ChangeInfo> {
        let path = format!("/{}/hostedzone/{}/rrset/", API_VERSION, zone_id);
        let resp = self.post(&path, request.to_xml()?).await?;

        if !resp.is_success() {
            return Err(Error::UpdateError(ErrorResponse::describe(
                resp.status,
                &resp.body,
            )));
        }

        let resp: ChangeResourceRecordSetsResponse = quick_xml::de::from_str(&resp.body)?;
        Ok(resp.change_info.into())
    }
}
