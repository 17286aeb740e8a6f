//! Payeer Gateway - signed Payeer API client and payment notification processing.
//!
//! The crate signs and sends account API requests, builds hosted checkout
//! forms, and verifies result notifications before handing accepted payments
//! to transactional observers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
