//! HTTP API for looking up the attestation records of a domain.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/records/:domain` (GET)
//!
//!   Returns the document-store and dns-did records of `domain` as a JSON array, in the order
//!   the DNS answers listed them:
//!
//!   ```json
//!   [
//!     {
//!       "type": "openatts",
//!       "net": "ethereum",
//!       "netId": "3",
//!       "addr": "0x2f60375e8144e16Adf1979936301D8341D58C36C",
//!       "dnssec": true
//!     },
//!     {
//!       "type": "openatts",
//!       "algorithm": "dns-did",
//!       "publicKey": "did:ethr:0xE6Fe788d8ca214A080b0f6aC7F48480b2AEfa9a6#controller",
//!       "version": "1.0",
//!       "dnssec": true
//!     }
//!   ]
//!   ```
//!
//!   A domain without matching records, or that doesn't exist, returns `[]`.
//!
//! ## `/document-store/:domain`, `/dns-did/:domain` (GET)
//!
//!   As above, restricted to one record shape.
//!
//! ## `/generic/:domain` (GET)
//!
//!   Returns records in the legacy generic form, `{"algorithm", "publicKey", "version"}`,
//!   without checking the record type or the DID syntax.
//!
//! # Errors
//!
//!   Failed lookups return a JSON body of the form `{"error": "..."}` with HTTP 400 (Bad Request)
//!   for invalid domain names, or HTTP 502 (Bad Gateway) when the upstream resolver fails.

mod api_error;
mod routes;
pub mod server;

pub use server::new;
