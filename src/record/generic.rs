use crate::record::dns_did::{ALGORITHM_KEYS, PUBLIC_KEY_KEYS, VERSION_KEYS};
use crate::record::{required, Algorithm, Rejection, Schema};
use crate::txt::{RecordPrefix, TokenMap};
use serde::{Deserialize, Serialize};

/// The legacy form of a dns-did record. Neither the record type nor the public key syntax are
/// checked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenericRecord {
    pub algorithm: Algorithm,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
}

impl Schema for GenericRecord {
    fn validate(tokens: &TokenMap, _prefix: RecordPrefix) -> Result<Self, Rejection> {
        Ok(Self {
            algorithm: required(tokens, ALGORITHM_KEYS, "algorithm")?.parse()?,
            public_key: required(tokens, PUBLIC_KEY_KEYS, "publicKey")?.to_string(),
            version: required(tokens, VERSION_KEYS, "version")?.to_string(),
            dnssec: None,
        })
    }

    fn with_dnssec(self, dnssec: bool) -> Self {
        Self {
            dnssec: Some(dnssec),
            ..self
        }
    }
}

impl GenericRecord {
    /// The canonical TXT data for this record. The record carries no type, so the namespace tag
    /// has to be supplied.
    #[must_use]
    pub fn to_txt(&self, prefix: RecordPrefix) -> String {
        format!(
            "{prefix} a={}; p={}; v={};",
            self.algorithm.as_str(),
            self.public_key,
            self.version
        )
    }
}
