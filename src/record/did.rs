//! Minimal [DID syntax] checking: `did:<method-name>:<method-specific-id>`.
//!
//! The method name must be lower case ASCII letters. The method specific id may itself contain
//! `:` and only has to be non-empty.
//!
//! [DID syntax]: https://www.w3.org/TR/did-core/#did-syntax

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref METHOD_NAME: Regex = Regex::new("^[a-z]+$").unwrap();
}

/// Returns true if `maybe_did` is a syntactically valid DID.
#[must_use]
pub fn is_valid(maybe_did: &str) -> bool {
    let mut segments = maybe_did.splitn(3, ':');
    let (Some("did"), Some(method_name), Some(method_specific_id)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    METHOD_NAME.is_match(method_name) && !method_specific_id.is_empty()
}
