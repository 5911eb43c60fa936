use std::path::Path;

use log::Log;

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::provider::route53::Route53;
use crate::provider::{ChangeInfo, Provider};
use crate::record::{ProviderRecord, ResolvedState};
use crate::resolver::{self, Resolver, SystemResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    UpToDate,
    Updated(ChangeInfo),
}

/// One check-and-update cycle for a single name.
pub struct Syncer<'a> {
    fqdn: String,
    ttl: u32,
    comment: String,

    fetcher: Box<dyn Fetcher>,
    resolver: Box<dyn Resolver>,
    provider: Box<dyn Provider>,
    logger: &'a dyn Log,
}

impl<'a> Syncer<'a> {
    pub fn new(
        config: &Config,
        fetcher: Box<dyn Fetcher>,
        resolver: Box<dyn Resolver>,
        provider: Box<dyn Provider>,
        logger: &'a dyn Log,
    ) -> Self {
        Self {
            fqdn: config.fqdn.clone(),
            ttl: config.ttl,
            comment: config.comment.clone(),
            fetcher,
            resolver,
            provider,
            logger,
        }
    }

    /// Wires the ipify fetcher, the system resolver and Route 53.
    pub fn from_config(config: &Config, logger: &'a dyn Log) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.ip_echo_url)?;
        let provider = Route53::new(config.credentials(), &config.hosted_zone_id)?;

        Ok(Self::new(
            config,
            Box::new(fetcher),
            Box::new(SystemResolver),
            Box::new(provider),
            logger,
        ))
    }

    pub async fn resolve(&self) -> Result<ResolvedState> {
        let wan_ip = self.fetcher.fetch().await?;
        log::debug!(logger: self.logger, "Current WAN IP is '{}'", wan_ip);

        let bound_ip = self.bound_ip().await;
        log::debug!(
            logger: self.logger,
            "Current IP bound to '{}' is '{}'",
            self.fqdn,
            bound_ip
        );

        Ok(ResolvedState { wan_ip, bound_ip })
    }

    // A failed lookup is indistinguishable from a missing record here, so
    // both mean "nothing bound" and the record gets (re)written.
    async fn bound_ip(&self) -> String {
        match self.resolver.lookup(&self.fqdn).await {
            Ok(addrs) => resolver::first_v4(&addrs),
            Err(e) => {
                log::warn!(
                    logger: self.logger,
                    "Cannot resolve '{}', treating it as unbound: {}",
                    self.fqdn,
                    e
                );
                String::new()
            }
        }
    }

    pub async fn sync(&self) -> Result<SyncOutcome> {
        let state = self.resolve().await?;

        if !state.needs_update() {
            log::info!(logger: self.logger, "'{}' is up to date", self.fqdn);
            return Ok(SyncOutcome::UpToDate);
        }

        log::info!(
            logger: self.logger,
            "'{}' out of date, update '{}' to '{}'",
            self.fqdn,
            state.bound_ip,
            state.wan_ip
        );

        let record =
            ProviderRecord::new_a(&self.fqdn, &state.wan_ip, self.ttl).with_comment(&self.comment);
        let info = self.provider.upsert(&record).await?;
        log::debug!(logger: self.logger, "Route53 response: {}", info);

        Ok(SyncOutcome::Updated(info))
    }
}

/// Loads the config at `config_path` and runs one cycle against the live
/// services. Nothing touches the network before the config is valid.
pub async fn run(config_path: &Path, logger: &dyn Log) -> Result<SyncOutcome> {
    let config = Config::load(config_path)?;
    let syncer = Syncer::from_config(&config, logger)?;
    syncer.sync().await
}
