//! Attestation record lookup.
//!
//! A [`Resolver`] asks a [`DnsQuery`] implementation for the TXT answers of a domain and runs
//! every answer through the [normalizer and tokenizer][crate::txt] and a
//! [record schema][crate::record]. Answers that are outside the configured namespace or fail
//! their schema are dropped. The rest keep their answer order and are annotated with the
//! response's DNSSEC flag.
//!
//! Three [`DnsQuery`] implementations are provided:
//!
//! * [`https::HttpsDnsQuery`] speaks the [DNS-over-HTTPS JSON API][doh-json], e.g. to
//!   `https://dns.google/resolve`.
//! * [`udp::UdpDnsQuery`] sends a classic DNS query over UDP to a single nameserver.
//! * [`memory::InMemoryDnsQuery`] answers from a fixed set of responses.
//!
//! [doh-json]: https://developers.google.com/speed/public-dns/docs/doh/json

use crate::error::Error;
use crate::record::{
    annotate, DnsDidRecord, DocumentStoreRecord, GenericRecord, Record, Schema,
};
use crate::txt::{self, RecordPrefix};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use trust_dns_proto::rr::Name;

pub mod https;
pub mod memory;
pub mod udp;

pub use https::HttpsDnsQuery;
pub use memory::InMemoryDnsQuery;
pub use udp::UdpDnsQuery;

/// One entry of a DNS answer section.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswer {
    pub name: String,
    /// The DNS resource record type, 16 for TXT.
    #[serde(rename = "type")]
    pub record_type: u16,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    pub data: String,
}

/// The answers to a single DNS query, shaped like a DNS JSON API response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    /// Whether the resolver validated every answer with DNSSEC.
    #[serde(rename = "AD", default)]
    pub authentic_data: bool,
    #[serde(rename = "Answer", default)]
    pub answers: Vec<RawAnswer>,
}

/// `DynDnsQuery` is a type alias for a [`DnsQuery`] shared between concurrent lookups.
pub type DynDnsQuery = Arc<dyn DnsQuery + Send + Sync>;

/// An async trait describing a TXT lookup for a domain.
#[async_trait::async_trait]
pub trait DnsQuery {
    /// Query the TXT records of `domain`. A domain without TXT records, or that doesn't exist,
    /// is an empty response rather than an error.
    async fn query_txt(&self, domain: &Name) -> Result<QueryResponse, Error>;
}

/// Looks up the attestation records published by a domain.
#[derive(Clone)]
pub struct Resolver {
    dns_query: DynDnsQuery,
    prefix: RecordPrefix,
}

impl Resolver {
    #[must_use]
    pub fn new(dns_query: DynDnsQuery, prefix: RecordPrefix) -> Self {
        Self { dns_query, prefix }
    }

    #[must_use]
    pub fn prefix(&self) -> RecordPrefix {
        self.prefix
    }

    /// Document-store and dns-did records of `domain`, each answer accepted as whichever of the
    /// two it validates as.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] for a malformed `domain`, or the error of the underlying
    /// [`DnsQuery`].
    pub async fn records(&self, domain: &str) -> Result<Vec<Record>, Error> {
        self.resolve(domain).await
    }

    /// Document-store records of `domain`.
    ///
    /// # Errors
    ///
    /// See [`Resolver::records`].
    pub async fn document_store_records(
        &self,
        domain: &str,
    ) -> Result<Vec<DocumentStoreRecord>, Error> {
        self.resolve(domain).await
    }

    /// dns-did records of `domain`.
    ///
    /// # Errors
    ///
    /// See [`Resolver::records`].
    pub async fn dns_did_records(&self, domain: &str) -> Result<Vec<DnsDidRecord>, Error> {
        self.resolve(domain).await
    }

    /// Records of `domain` in the legacy generic form.
    ///
    /// # Errors
    ///
    /// See [`Resolver::records`].
    pub async fn generic_records(&self, domain: &str) -> Result<Vec<GenericRecord>, Error> {
        self.resolve(domain).await
    }

    async fn resolve<T: Schema>(&self, domain: &str) -> Result<Vec<T>, Error> {
        tracing::trace!("received request to resolve {domain}");
        let name = parse_domain(domain)?;
        let response = self.dns_query.query_txt(&name).await?;
        tracing::trace!("lookup results for {domain}: {:?}", response.answers);
        Ok(parse_results(
            &response.answers,
            response.authentic_data,
            self.prefix,
        ))
    }
}

fn parse_domain(domain: &str) -> Result<Name, Error> {
    if domain.trim().is_empty() {
        return Err(Error::InvalidDomain(domain.to_string()));
    }
    Name::from_str(domain).map_err(|_| Error::InvalidDomain(domain.to_string()))
}

/// Parse every answer in the `prefix` namespace as a `T`, dropping those that don't validate,
/// and set `dnssec` on the survivors.
pub fn parse_results<T: Schema>(answers: &[RawAnswer], dnssec: bool, prefix: RecordPrefix) -> Vec<T> {
    txt::prefixed_records(answers.iter().map(|answer| answer.data.as_str()), prefix)
        .filter_map(|tokens| match T::validate(&tokens, prefix) {
            Ok(record) => Some(record),
            Err(rejection) => {
                tracing::debug!("dropped {} record: {rejection}", tokens.record_type());
                None
            }
        })
        .map(annotate(dnssec))
        .collect()
}

#[must_use]
pub fn parse_records(answers: &[RawAnswer], dnssec: bool, prefix: RecordPrefix) -> Vec<Record> {
    parse_results(answers, dnssec, prefix)
}

#[must_use]
pub fn parse_document_store_results(
    answers: &[RawAnswer],
    dnssec: bool,
    prefix: RecordPrefix,
) -> Vec<DocumentStoreRecord> {
    parse_results(answers, dnssec, prefix)
}

#[must_use]
pub fn parse_dns_did_results(
    answers: &[RawAnswer],
    dnssec: bool,
    prefix: RecordPrefix,
) -> Vec<DnsDidRecord> {
    parse_results(answers, dnssec, prefix)
}

#[must_use]
pub fn parse_generic_results(
    answers: &[RawAnswer],
    dnssec: bool,
    prefix: RecordPrefix,
) -> Vec<GenericRecord> {
    parse_results(answers, dnssec, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BlockchainNetwork, EthereumNetworkId};
    use trust_dns_proto::rr::RecordType;

    const ADDR: &str = "0x2f60375e8144e16Adf1979936301D8341D58C36C";
    const DID: &str = "did:ethr:0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6#controller";

    fn answer(data: &str) -> RawAnswer {
        RawAnswer {
            name: "example.openattestation.com.".to_string(),
            record_type: u16::from(RecordType::TXT),
            ttl: 110,
            data: data.to_string(),
        }
    }

    #[test]
    fn parses_quoted_document_store_record() {
        let answers = [answer(&format!(
            r#""openatts net=ethereum netId=3 addr={ADDR}""#
        ))];
        assert_eq!(
            parse_document_store_results(&answers, true, RecordPrefix::Openatts),
            vec![DocumentStoreRecord {
                record_type: RecordPrefix::Openatts,
                net: BlockchainNetwork::Ethereum,
                net_id: EthereumNetworkId::Ropsten,
                addr: ADDR.to_string(),
                dnssec: Some(true),
            }]
        );
    }

    #[test]
    fn keeps_answer_order_and_drops_invalid_records() {
        let answers = [
            answer(&format!(r#""openatts net=ethereum netId=1 addr={ADDR}""#)),
            answer(r#""openatts foobarbar""#),
            answer(r#""v=spf1 -all""#),
            answer(&format!(r#""openatts net=ethereum netId=4 addr={ADDR}""#)),
            answer(&format!(r#""openatts net=ethereum netId=3 addr={ADDR}""#)),
            answer(&format!(r#""openatts net=ethereum netId=4 addr={ADDR}""#)),
        ];
        let ids: Vec<&str> = parse_document_store_results(&answers, false, RecordPrefix::Openatts)
            .iter()
            .map(|record| record.net_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4", "3", "4"]);
    }

    #[test]
    fn drops_records_from_other_namespaces() {
        let answers = [answer(&format!(
            r#""worldatts net=ethereum netId=3 addr={ADDR}""#
        ))];
        assert!(parse_document_store_results(&answers, true, RecordPrefix::Openatts).is_empty());
        assert_eq!(
            parse_document_store_results(&answers, true, RecordPrefix::Worldatts).len(),
            1
        );
    }

    #[test]
    fn parses_dns_did_records() {
        let answers = [
            answer(&format!(r#""openatts a=dns-did; p={DID}; v=1.0;""#)),
            answer(r#""openatts a=dns-did; p=did::nope; v=1.0;""#),
        ];
        let records = parse_dns_did_results(&answers, true, RecordPrefix::Openatts);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].public_key, DID);
        assert_eq!(records[0].dnssec, Some(true));
    }

    #[test]
    fn combined_parse_mixes_variants_in_order() {
        let answers = [
            answer(&format!(r#""openatts a=dns-did; p={DID}; v=1.0;""#)),
            answer(&format!(r#""openatts net=ethereum netId=3 addr={ADDR}""#)),
        ];
        let records = parse_records(&answers, false, RecordPrefix::Openatts);
        assert!(matches!(
            records.as_slice(),
            [Record::DnsDid(_), Record::DocumentStore(_)]
        ));
    }

    #[test]
    fn generic_parse_is_looser() {
        let answers = [answer(r#""openatts a=dns-did; p=not-a-did; v=1.0;""#)];
        assert!(parse_dns_did_results(&answers, false, RecordPrefix::Openatts).is_empty());
        assert_eq!(
            parse_generic_results(&answers, false, RecordPrefix::Openatts).len(),
            1
        );
    }

    #[test]
    fn empty_answers_parse_to_nothing() {
        assert!(parse_records(&[], true, RecordPrefix::Openatts).is_empty());
    }

    #[test]
    fn query_response_reads_dns_json() {
        let body = serde_json::json!({
            "Status": 0,
            "TC": false,
            "AD": true,
            "Question": [{ "name": "example.openattestation.com.", "type": 16 }],
            "Answer": [{
                "name": "example.openattestation.com.",
                "type": 16,
                "TTL": 110,
                "data": format!("\"openatts net=ethereum netId=3 addr={ADDR}\""),
            }],
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        assert!(response.authentic_data);
        assert_eq!(response.answers.len(), 1);
        assert_eq!(response.answers[0].ttl, 110);

        let nxdomain: QueryResponse =
            serde_json::from_value(serde_json::json!({ "Status": 3 })).unwrap();
        assert_eq!(nxdomain, QueryResponse::default());
    }

    #[tokio::test]
    async fn resolver_annotates_with_response_flag() {
        let mut dns_query = InMemoryDnsQuery::default();
        dns_query.insert(
            &Name::from_str("example.openattestation.com").unwrap(),
            QueryResponse {
                authentic_data: true,
                answers: vec![answer(&format!(
                    r#""openatts net=ethereum netId=3 addr={ADDR}""#
                ))],
            },
        );
        let resolver = Resolver::new(Arc::new(dns_query), RecordPrefix::Openatts);

        let records = resolver
            .document_store_records("example.openattestation.com")
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dnssec, Some(true));
        assert!(resolver
            .dns_did_records("example.openattestation.com")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn resolver_rejects_invalid_domains() {
        let resolver = Resolver::new(
            Arc::new(InMemoryDnsQuery::default()),
            RecordPrefix::Openatts,
        );
        assert!(matches!(
            resolver.records("  ").await,
            Err(Error::InvalidDomain(_))
        ));
    }

    #[tokio::test]
    async fn unknown_domain_resolves_to_nothing() {
        let resolver = Resolver::new(
            Arc::new(InMemoryDnsQuery::default()),
            RecordPrefix::Openatts,
        );
        assert!(resolver
            .records("thisdoesnotexist.gov.sg")
            .await
            .unwrap()
            .is_empty());
    }
}
