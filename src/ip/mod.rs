//! IP address plan for generated devices.
//!
//! Switch addresses derive from their fabric role; server addresses are
//! sequential within a per-class subnet.

pub mod allocator;

pub use allocator::{role_prefix, server_address, switch_address};
