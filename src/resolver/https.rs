//! A [DNS-over-HTTPS JSON API][doh-json] implementation of the [`DnsQuery`] trait.
//!
//! [doh-json]: https://developers.google.com/speed/public-dns/docs/doh/json

use crate::error::Error;
use crate::resolver::{DnsQuery, QueryResponse};
use reqwest::header::ACCEPT;
use std::time::Duration;
use trust_dns_proto::rr::{Name, RecordType};

/// Google's public DNS JSON endpoint.
pub const DEFAULT_URL: &str = "https://dns.google/resolve";

const DNS_JSON: &str = "application/dns-json";

/// Queries a DNS JSON API endpoint with `GET <url>?name=<domain>&type=TXT`.
///
/// The response's `AD` flag is relayed as is. Whether it can be trusted is a matter of trusting
/// the resolver and the HTTPS connection to it.
#[derive(Debug, Clone)]
pub struct HttpsDnsQuery {
    client: reqwest::Client,
    url: String,
}

impl HttpsDnsQuery {
    /// Build a client for the endpoint at `url`. Each query is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client can't be initialized.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl DnsQuery for HttpsDnsQuery {
    async fn query_txt(&self, domain: &Name) -> Result<QueryResponse, Error> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("name", domain.to_ascii()),
                ("type", RecordType::TXT.to_string()),
            ])
            .header(ACCEPT, DNS_JSON)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<QueryResponse>().await?)
    }
}
