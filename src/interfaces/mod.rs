//! Input and output adapters for the binary.

pub mod csv;
