//! Normalization and tokenization of raw TXT record data.
//!
//! Attestation metadata is published as a single TXT string per record, starting with a reserved
//! namespace token and followed by space separated `key=value` pairs:
//!
//! ```text
//! "openatts net=ethereum netId=3 addr=0x2f60375e8144e16Adf1979936301D8341D58C36C"
//! ```
//!
//! Some resolvers return the string wrapped in double quotes, others don't. [`unquote`] strips
//! one pair of surrounding quotes when present, [`has_prefix`] keeps only records in the
//! configured namespace, and [`tokenize`] turns what remains into a [`TokenMap`]. Nothing here
//! validates field values, that's left to the [record schemas][crate::record].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod token_map;

pub use token_map::{tokenize, TokenMap};

/// The reserved namespace token that starts every attestation TXT record. Doubles as the value
/// of the `type` field of validated records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordPrefix {
    #[default]
    Openatts,
    Worldatts,
}

impl RecordPrefix {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RecordPrefix::Openatts => "openatts",
            RecordPrefix::Worldatts => "worldatts",
        }
    }
}

impl fmt::Display for RecordPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordPrefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openatts" => Ok(RecordPrefix::Openatts),
            "worldatts" => Ok(RecordPrefix::Worldatts),
            _ => Err(Error::UnknownRecordPrefix(s.to_string())),
        }
    }
}

/// Strip exactly one leading and one trailing `"` if the data is wrapped in a pair of them,
/// otherwise return it unchanged.
#[must_use]
pub fn unquote(data: &str) -> &str {
    data.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(data)
}

/// Returns true when `record` starts with the `prefix` token. The token must be followed by
/// whitespace or the end of the record, so `openattsfoo ...` is not in the `openatts` namespace.
///
/// This is stricter than a plain `starts_with`: records such as `openattsx a=dns-did ...` are left
/// out of every lookup, the generic one included.
#[must_use]
pub fn has_prefix(record: &str, prefix: RecordPrefix) -> bool {
    record
        .strip_prefix(prefix.as_str())
        .map_or(false, |rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Unquote each raw TXT data string, drop those outside the `prefix` namespace and tokenize the
/// rest. Input order is preserved.
pub fn prefixed_records<'a>(
    data: impl IntoIterator<Item = &'a str> + 'a,
    prefix: RecordPrefix,
) -> impl Iterator<Item = TokenMap> + 'a {
    data.into_iter()
        .map(unquote)
        .filter(move |record| has_prefix(record, prefix))
        .map(tokenize)
}
