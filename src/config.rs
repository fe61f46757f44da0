use crate::error::Error;
use crate::resolver::{https, DynDnsQuery, HttpsDnsQuery, Resolver, UdpDnsQuery};
use crate::txt::RecordPrefix;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub record_prefix: RecordPrefix,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub query_timeout: Duration,
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
}

/// Where TXT queries are sent.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolverConfig {
    /// A DNS-over-HTTPS JSON API endpoint.
    Https { url: String },
    /// A recursive nameserver reached over UDP.
    Udp { addr: SocketAddr },
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig::Https {
            url: https::DEFAULT_URL.to_string(),
        }
    }
}

impl Config {
    /// Load a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, or [`Error::InvalidJSON`] if its content
    /// isn't a valid config.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Build the configured [`DnsQuery`][crate::resolver::DnsQuery] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the DNS-over-HTTPS client can't be initialized.
    pub fn dns_query(&self) -> Result<DynDnsQuery, Error> {
        let dns_query: DynDnsQuery = match &self.resolver {
            ResolverConfig::Https { url } => {
                Arc::new(HttpsDnsQuery::new(url, self.query_timeout)?)
            }
            ResolverConfig::Udp { addr } => Arc::new(UdpDnsQuery::new(*addr, self.query_timeout)),
        };
        Ok(dns_query)
    }

    /// Build a [`Resolver`] over the configured DNS query and record prefix.
    ///
    /// # Errors
    ///
    /// See [`Config::dns_query`].
    pub fn resolver(&self) -> Result<Resolver, Error> {
        Ok(Resolver::new(self.dns_query()?, self.record_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_config() {
        let config: Config = serde_json::from_value(json!({
            "record_prefix": "worldatts",
            "resolver": { "kind": "udp", "addr": "127.0.0.1:53" },
            "query_timeout": 5,
            "api_bind_addr": "127.0.0.1:3000",
            "api_timeout": 10,
        }))
        .unwrap();
        assert_eq!(config.record_prefix, RecordPrefix::Worldatts);
        assert_eq!(
            config.resolver,
            ResolverConfig::Udp {
                addr: "127.0.0.1:53".parse().unwrap()
            }
        );
        assert_eq!(config.query_timeout, Duration::from_secs(5));
        assert_eq!(config.api_timeout, Duration::from_secs(10));
    }

    #[test]
    fn defaults_to_openatts_over_google_doh() {
        let config: Config = serde_json::from_value(json!({
            "query_timeout": 5,
            "api_bind_addr": "127.0.0.1:3000",
            "api_timeout": 10,
        }))
        .unwrap();
        assert_eq!(config.record_prefix, RecordPrefix::Openatts);
        assert_eq!(
            config.resolver,
            ResolverConfig::Https {
                url: "https://dns.google/resolve".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_prefix() {
        let result = serde_json::from_value::<Config>(json!({
            "record_prefix": "notatts",
            "query_timeout": 5,
            "api_bind_addr": "127.0.0.1:3000",
            "api_timeout": 10,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::try_from_file("/nonexistent/dnsprove.json"),
            Err(Error::IO(_))
        ));
    }
}
