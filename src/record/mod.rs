//! Typed attestation records and the schemas that validate them.
//!
//! A tokenized TXT record is accepted as exactly one of three shapes:
//!
//! * [`DocumentStoreRecord`]: the blockchain network, network id and contract address that
//!   issue documents for a domain, e.g.
//!   `openatts net=ethereum netId=3 addr=0x2f60375e8144e16Adf1979936301D8341D58C36C`.
//! * [`DnsDidRecord`]: a [DID] whose key signs documents for a domain, e.g.
//!   `openatts a=dns-did; p=did:ethr:0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6#controller; v=1.0;`.
//! * [`GenericRecord`]: the older, looser form of a dns-did record. It doesn't check the record
//!   type or the DID syntax and is only used when asked for explicitly.
//!
//! Validation either produces the whole record or a [`Rejection`]. There are no partial records.
//! Rejections are reported for logging only, callers of the [resolver][crate::resolver] just
//! see the record missing from the result.
//!
//! [DID]: https://www.w3.org/TR/did-core/#did-syntax

use crate::txt::{RecordPrefix, TokenMap};
use serde::{Deserialize, Serialize};

pub mod did;
pub mod dns_did;
pub mod document_store;
pub mod generic;

pub use dns_did::{Algorithm, DnsDidRecord};
pub use document_store::{BlockchainNetwork, DocumentStoreRecord, EthereumNetworkId};
pub use generic::GenericRecord;

/// Why a tokenized record failed a schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),
    #[error("record type \"{actual}\" is not \"{expected}\"")]
    UnexpectedType {
        expected: RecordPrefix,
        actual: String,
    },
    #[error("unsupported blockchain network \"{0}\"")]
    UnsupportedNetwork(String),
    #[error("unsupported network id \"{0}\"")]
    UnsupportedNetworkId(String),
    #[error("{0} is not a valid ethereum address")]
    InvalidAddress(String),
    #[error("unsupported algorithm \"{0}\"")]
    UnsupportedAlgorithm(String),
    #[error("{0} is not a valid did")]
    InvalidDid(String),
    #[error("version must not be empty")]
    EmptyVersion,
}

/// A record shape that can be validated from a [`TokenMap`].
pub trait Schema: Sized {
    /// Accept the whole record or reject it. `prefix` is the namespace the deployment is
    /// configured for.
    ///
    /// # Errors
    ///
    /// Returns the first [`Rejection`] found among the required fields.
    fn validate(tokens: &TokenMap, prefix: RecordPrefix) -> Result<Self, Rejection>;

    /// Set the DNSSEC flag of the response this record came from.
    #[must_use]
    fn with_dnssec(self, dnssec: bool) -> Self;
}

/// Any one of the strictly typed record shapes.
///
/// [`Record::validate`] tries the document-store schema first and then the dns-did schema. The
/// two can't both accept a record since they require disjoint fields. [`GenericRecord`] is
/// deliberately not a variant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    DocumentStore(DocumentStoreRecord),
    DnsDid(DnsDidRecord),
}

impl Schema for Record {
    fn validate(tokens: &TokenMap, prefix: RecordPrefix) -> Result<Self, Rejection> {
        // Report the dns-did rejection when the record at least names an algorithm.
        match DocumentStoreRecord::validate(tokens, prefix) {
            Ok(record) => Ok(Record::DocumentStore(record)),
            Err(doc_store_rejection) => match DnsDidRecord::validate(tokens, prefix) {
                Ok(record) => Ok(Record::DnsDid(record)),
                Err(did_rejection) if tokens.get_any(dns_did::ALGORITHM_KEYS).is_some() => {
                    Err(did_rejection)
                }
                Err(_) => Err(doc_store_rejection),
            },
        }
    }

    fn with_dnssec(self, dnssec: bool) -> Self {
        match self {
            Record::DocumentStore(record) => Record::DocumentStore(record.with_dnssec(dnssec)),
            Record::DnsDid(record) => Record::DnsDid(record.with_dnssec(dnssec)),
        }
    }

}

impl Record {
    /// The canonical TXT data for this record, without the DNSSEC flag.
    #[must_use]
    pub fn to_txt(&self) -> String {
        match self {
            Record::DocumentStore(record) => record.to_txt(),
            Record::DnsDid(record) => record.to_txt(),
        }
    }
}

/// Annotate a validated record with the DNSSEC flag of the whole response.
pub fn annotate<T: Schema>(dnssec: bool) -> impl Fn(T) -> T {
    move |record| record.with_dnssec(dnssec)
}

fn required<'a>(
    tokens: &'a TokenMap,
    keys: &[&str],
    field: &'static str,
) -> Result<&'a str, Rejection> {
    tokens.get_any(keys).ok_or(Rejection::MissingField(field))
}

fn record_type(tokens: &TokenMap, prefix: RecordPrefix) -> Result<RecordPrefix, Rejection> {
    if tokens.record_type() == prefix.as_str() {
        Ok(prefix)
    } else {
        Err(Rejection::UnexpectedType {
            expected: prefix,
            actual: tokens.record_type().to_string(),
        })
    }
}
