use crate::record::{did, record_type, required, Rejection, Schema};
use crate::txt::{RecordPrefix, TokenMap};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Published records use the short keys, the long names are a fallback.
pub(super) const ALGORITHM_KEYS: &[&str] = &["a", "algorithm"];
pub(super) const PUBLIC_KEY_KEYS: &[&str] = &["p", "publicKey"];
pub(super) const VERSION_KEYS: &[&str] = &["v", "version"];

/// Key discovery algorithms.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[serde(rename = "dns-did")]
    DnsDid,
}

impl Algorithm {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::DnsDid => "dns-did",
        }
    }
}

impl FromStr for Algorithm {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns-did" => Ok(Algorithm::DnsDid),
            _ => Err(Rejection::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// A DID whose key may sign documents issued under a domain.
///
/// Published as `openatts a=dns-did; p=<did>; v=<version>;`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DnsDidRecord {
    #[serde(rename = "type")]
    pub record_type: RecordPrefix,
    pub algorithm: Algorithm,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
}

impl Schema for DnsDidRecord {
    fn validate(tokens: &TokenMap, prefix: RecordPrefix) -> Result<Self, Rejection> {
        let record_type = record_type(tokens, prefix)?;
        let algorithm = required(tokens, ALGORITHM_KEYS, "algorithm")?.parse()?;
        let public_key = required(tokens, PUBLIC_KEY_KEYS, "publicKey")?;
        if !did::is_valid(public_key) {
            return Err(Rejection::InvalidDid(public_key.to_string()));
        }
        let version = required(tokens, VERSION_KEYS, "version")?;
        if version.is_empty() {
            return Err(Rejection::EmptyVersion);
        }
        Ok(Self {
            record_type,
            algorithm,
            public_key: public_key.to_string(),
            version: version.to_string(),
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

impl DnsDidRecord {
    /// The canonical TXT data for this record, under its own record type.
    #[must_use]
    pub fn to_txt(&self) -> String {
        format!(
            "{} a={}; p={}; v={};",
            self.record_type,
            self.algorithm.as_str(),
            self.public_key,
            self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txt::tokenize;

    const DID: &str = "did:ethr:0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6#controller";

    fn validate(record: &str) -> Result<DnsDidRecord, Rejection> {
        DnsDidRecord::validate(&tokenize(record), RecordPrefix::Openatts)
    }

    #[test]
    fn accepts_short_keys() {
        let record = validate(&format!("openatts a=dns-did; p={DID}; v=1.0;")).unwrap();
        assert_eq!(
            record,
            DnsDidRecord {
                record_type: RecordPrefix::Openatts,
                algorithm: Algorithm::DnsDid,
                public_key: DID.to_string(),
                version: "1.0".to_string(),
                dnssec: None,
            }
        );
    }

    #[test]
    fn accepts_long_keys() {
        let record =
            validate(&format!("openatts algorithm=dns-did publicKey={DID} version=1.0")).unwrap();
        assert_eq!(record.public_key, DID);
    }

    #[test]
    fn rejects_invalid_did() {
        assert_eq!(
            validate("openatts a=dns-did; p=did:GITHUB:gjgd; v=1.0;"),
            Err(Rejection::InvalidDid("did:GITHUB:gjgd".to_string()))
        );
        assert_eq!(
            validate("openatts a=dns-did; p=0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6; v=1.0;"),
            Err(Rejection::InvalidDid(
                "0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6".to_string()
            ))
        );
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert_eq!(
            validate(&format!("openatts a=dns-ethr; p={DID}; v=1.0;")),
            Err(Rejection::UnsupportedAlgorithm("dns-ethr".to_string()))
        );
    }

    #[test]
    fn rejects_empty_or_missing_version() {
        assert_eq!(
            validate(&format!("openatts a=dns-did; p={DID}; v=;")),
            Err(Rejection::EmptyVersion)
        );
        assert_eq!(
            validate(&format!("openatts a=dns-did; p={DID};")),
            Err(Rejection::MissingField("version"))
        );
    }

    #[test]
    fn rejects_wrong_type() {
        assert!(matches!(
            validate(&format!("worldatts a=dns-did; p={DID}; v=1.0;")),
            Err(Rejection::UnexpectedType { .. })
        ));
    }

    #[test]
    fn serializes_with_wire_names() {
        let record = validate(&format!("openatts a=dns-did; p={DID}; v=1.0;"))
            .unwrap()
            .with_dnssec(false);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({
                "type": "openatts",
                "algorithm": "dns-did",
                "publicKey": DID,
                "version": "1.0",
                "dnssec": false,
            })
        );
    }
}
