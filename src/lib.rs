//! dnsprove
//!
//! Discover, from a domain name alone, which document store contract or which [DID] is
//! authoritative for attestation documents issued under that domain.
//!
//! Domains publish the answer as [TXT records] in a reserved namespace:
//!
//! ```text
//! example.openattestation.com. 300 IN TXT "openatts net=ethereum netId=3 addr=0x2f60375e8144e16Adf1979936301D8341D58C36C"
//! example.openattestation.com. 300 IN TXT "openatts a=dns-did; p=did:ethr:0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6#controller; v=1.0;"
//! ```
//!
//! TXT content is untrusted and loosely formatted. Records that don't parse, or don't validate
//! against one of the [record schemas][record], are silently left out of lookup results. Every
//! record that survives is annotated with whether the resolver validated the response with
//! [DNSSEC].
//!
//! [DID]: https://www.w3.org/TR/did-core/#did-syntax
//! [TXT records]: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.14
//! [DNSSEC]: https://www.rfc-editor.org/rfc/rfc4033
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod resolver;
pub mod txt;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use record::{DnsDidRecord, DocumentStoreRecord, GenericRecord, Record};
pub use resolver::{DnsQuery, QueryResponse, RawAnswer, Resolver};
