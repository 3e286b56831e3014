//! Application layer containing the payment decision logic.
//!
//! This module defines the `PaymentService` which acts as the primary entry point
//! for evaluating payments. It depends only on the domain ports, never on a
//! concrete store.

pub mod payment_service;
