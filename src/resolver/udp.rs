//! A plain DNS over UDP implementation of the [`DnsQuery`] trait.

use crate::error::Error;
use crate::resolver::{DnsQuery, QueryResponse, RawAnswer};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use trust_dns_client::client::{AsyncClient, ClientHandle};
use trust_dns_client::rr::{DNSClass, Name, RData, Record, RecordType};
use trust_dns_client::udp::UdpClientStream;

/// Sends each TXT query to a single recursive nameserver over UDP.
///
/// The AD bit of the response header is relayed as the DNSSEC flag. It's only meaningful for a
/// validating resolver reached over a trusted path, e.g. one on localhost.
#[derive(Debug, Clone, Copy)]
pub struct UdpDnsQuery {
    nameserver: SocketAddr,
    timeout: Duration,
}

impl UdpDnsQuery {
    #[must_use]
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        Self {
            nameserver,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl DnsQuery for UdpDnsQuery {
    async fn query_txt(&self, domain: &Name) -> Result<QueryResponse, Error> {
        let stream = UdpClientStream::<UdpSocket>::with_timeout(self.nameserver, self.timeout);
        let (mut client, background) = AsyncClient::connect(stream).await?;
        let background = tokio::spawn(background);
        let response = client
            .query(domain.clone(), DNSClass::IN, RecordType::TXT)
            .await;
        background.abort();
        let response = response?;

        Ok(QueryResponse {
            authentic_data: response.header().authentic_data(),
            answers: response.answers().iter().filter_map(raw_answer).collect(),
        })
    }
}

// Multiple character-strings of one TXT record are concatenated.
fn raw_answer(record: &Record) -> Option<RawAnswer> {
    let data = match record.data()? {
        RData::TXT(txt) => txt
            .txt_data()
            .iter()
            .map(|s| String::from_utf8_lossy(s))
            .collect(),
        other => other.to_string(),
    };
    Some(RawAnswer {
        name: record.name().to_string(),
        record_type: u16::from(record.rr_type()),
        ttl: record.ttl(),
        data,
    })
}
