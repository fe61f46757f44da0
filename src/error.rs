//! Error types.
//!
//! Malformed TXT records are never errors: they're dropped during parsing and only logged. See
//! [`Rejection`][crate::record::Rejection].

use trust_dns_client::error::ClientError;
use trust_dns_proto::error::ProtoError;

/// Error enumerates the ways a lookup, or loading configuration, can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a lookup is requested for a string that isn't a valid DNS name.
    #[error("invalid domain name \"{0}\"")]
    InvalidDomain(String),

    /// Returned when the DNS-over-HTTPS resolver can't be reached, answers with an HTTP error
    /// status, or returns a body that isn't a DNS JSON answer.
    #[error("DNS-over-HTTPS query failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Returned when a UDP DNS query fails or times out.
    #[error("DNS query failed: {0}")]
    Client(#[from] ClientError),

    /// Returned when setting up the connection to a UDP nameserver fails.
    #[error("DNS error")]
    DNSError(#[from] ProtoError),

    /// Returned when a [record prefix][crate::txt::RecordPrefix] is neither `openatts` nor
    /// `worldatts`.
    #[error("unknown record prefix \"{0}\"")]
    UnknownRecordPrefix(String),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
