//! JSON adapter between the HTTP layer and the payment ledger.

pub mod handler;
pub mod requests;
pub mod views;
