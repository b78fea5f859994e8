//! Fee assessments, payment transactions and the rules that tie them together.
//!
//! Nothing here performs I/O. Storage is reached only through the traits in
//! [`ports`].

pub mod balance;
pub mod fee;
pub mod ids;
pub mod money;
pub mod ports;
pub mod transaction;
