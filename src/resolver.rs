use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Forward name resolution used to find the address currently published for a
/// name.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>>;
}

/// Resolves through the operating system's resolver (`getaddrinfo`).
#[derive(Debug, Clone, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((name, 0))
            .await
            .map_err(|e| Error::NetworkError(format!("lookup of '{}' failed: {}", name, e)))?;

        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// The bound address is the first IPv4 answer, or empty when there is none.
pub fn first_v4(addrs: &[IpAddr]) -> String {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .map(|addr| addr.to_string())
        .unwrap_or_default()
}
