//! Application layer orchestrating the fee and payment use cases.
//!
//! [`ledger::PaymentLedger`] reads assessments, drives the transaction
//! lifecycle and derives balances. It owns boxed storage ports and is safe to
//! share across tasks.

pub mod ledger;
