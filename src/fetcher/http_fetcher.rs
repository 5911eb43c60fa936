use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::wrapper::http::Client;

use super::Fetcher;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: String,
}

/// Asks an ipify-style echo service for the caller's address. The service must
/// answer with a JSON object like `{"ip": "203.0.113.9"}`.
pub struct HttpFetcher {
    url: String,
    cli: Client,
}

impl HttpFetcher {
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: url.to_string(),
            cli: Client::with_timeout(FETCH_TIMEOUT)?,
        })
    }

    pub async fn fetch_v4(&self) -> Result<String> {
        let response = self.cli.get(&self.url, None).await?;
        if !response.is_success() {
            return Err(Error::NetworkError(format!(
                "{} answered with status {}",
                self.url, response.status
            )));
        }

        Self::parse_content_v4(&response.body)
    }

    pub fn parse_content_v4(content: &str) -> Result<String> {
        let echo: IpEcho = serde_json::from_str(content)
            .map_err(|e| Error::DecodeError(format!("unexpected ip echo response: {}", e)))?;

        let ip = echo.ip.trim();
        ip.parse::<Ipv4Addr>().map_err(|e| {
            Error::DecodeError(format!("ip echo returned '{}', not an IPv4 address: {}", ip, e))
        })?;

        Ok(ip.to_string())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String> {
        self.fetch_v4().await
    }
}
