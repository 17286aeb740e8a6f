//! Adapters - implementations of port interfaces.

pub mod http;
pub mod memory;
pub mod payeer;
pub mod postgres;
