use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::error::Result;
use crate::provider::route53::Credentials;

pub const DEFAULT_TTL: u32 = 300;
pub const DEFAULT_COMMENT: &str = "IP update by route53-ddns";
pub const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org?format=json";

////////////////////////////////////////////////////////////
// Config
////////////////////////////////////////////////////////////
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub hosted_zone_id: String,
    pub fqdn: String,
    pub ttl: u32,
    pub comment: String,
    pub ip_echo_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_access_key_id: String::new(),
            aws_secret_access_key: String::new(),
            hosted_zone_id: String::new(),
            fqdn: String::new(),
            ttl: DEFAULT_TTL,
            comment: DEFAULT_COMMENT.to_string(),
            ip_echo_url: DEFAULT_IP_ECHO_URL.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &"<redacted>")
            .field("hosted_zone_id", &self.hosted_zone_id)
            .field("fqdn", &self.fqdn)
            .field("ttl", &self.ttl)
            .field("comment", &self.comment)
            .field("ip_echo_url", &self.ip_echo_url)
            .finish()
    }
}

impl Config {
    /// Reads and validates the config file at `path`. Files ending in `.yaml`
    /// or `.yml` are parsed as YAML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );

        let config = if is_yaml {
            Parser::parse_yaml(path)?
        } else {
            Parser::parse_json(path)?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("AwsAccessKeyId", &self.aws_access_key_id),
            ("AwsSecretAccessKey", &self.aws_secret_access_key),
            ("HostedZoneId", &self.hosted_zone_id),
            ("Fqdn", &self.fqdn),
            ("IpEchoUrl", &self.ip_echo_url),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::ConfigError(format!("{} is missing or empty", name)));
            }
        }

        if self.ttl == 0 {
            return Err(Error::ConfigError("Ttl must be greater than 0".into()));
        }

        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            access_key_id: self.aws_access_key_id.clone(),
            secret_access_key: self.aws_secret_access_key.clone(),
        }
    }
}

////////////////////////////////////////////////////////////
// Parser
////////////////////////////////////////////////////////////
pub struct Parser;

impl Parser {
    pub fn parse_json<P: AsRef<Path>>(path: P) -> Result<Config> {
        let reader = Self::file_reader(&path)?;
        serde_json::from_reader(reader).map_err(|e| {
            Error::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    pub fn parse_yaml<P: AsRef<Path>>(path: P) -> Result<Config> {
        let reader = Self::file_reader(&path)?;
        serde_yaml::from_reader(reader).map_err(|e| {
            Error::ConfigError(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    fn file_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let f = File::open(&path).map_err(|e| {
            Error::ConfigError(format!("cannot open {}: {}", path.as_ref().display(), e))
        })?;
        Ok(BufReader::new(f))
    }
}

////////////////////////////////////////////////////////////
// Unit test
////////////////////////////////////////////////////////////
#[cfg(test)]
#[path = "config_test.rs"]
mod test;
