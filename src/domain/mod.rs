//! Domain types and ports. No I/O lives here.

pub mod account;
pub mod payment;
pub mod ports;
