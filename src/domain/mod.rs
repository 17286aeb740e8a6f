//! Domain layer containing the gateway protocol.
//!
//! - `gateway` - Signing, credentials, request building, response parsing and
//!   notification verification for the Payeer API
pub mod gateway;
