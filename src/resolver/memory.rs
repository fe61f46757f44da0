use crate::error::Error;
use crate::resolver::{DnsQuery, QueryResponse};
use std::collections::HashMap;
use trust_dns_client::rr::{LowerName, Name};

/// Answers TXT queries from a fixed map of responses keyed by domain. Domains that aren't in the
/// map get an empty, unauthenticated response, the same as a domain that doesn't exist.
#[derive(Default, Debug, Clone)]
pub struct InMemoryDnsQuery {
    responses: HashMap<LowerName, QueryResponse>,
}

impl InMemoryDnsQuery {
    /// Set the response for `domain`, replacing any previous one.
    pub fn insert(&mut self, domain: &Name, response: QueryResponse) {
        self.responses.insert(key(domain), response);
    }
}

// Lookups match regardless of a trailing dot.
fn key(domain: &Name) -> LowerName {
    let mut domain = domain.clone();
    domain.set_fqdn(true);
    LowerName::new(&domain)
}

#[async_trait::async_trait]
impl DnsQuery for InMemoryDnsQuery {
    async fn query_txt(&self, domain: &Name) -> Result<QueryResponse, Error> {
        Ok(self
            .responses
            .get(&key(domain))
            .map_or(QueryResponse::default(), Clone::clone))
    }
}
