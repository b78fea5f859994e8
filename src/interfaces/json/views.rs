//! Wire shapes returned to the HTTP layer.
//!
//! Field names and nesting match what existing clients already parse. Money
//! goes out as JSON numbers.

use crate::application::ledger::{
    ConfirmedPayment, FeeStatement, InitiatedPayment, TransactionDetail, TransactionHistory,
};
use crate::domain::balance::PaymentStatus;
use crate::domain::fee::EnrollmentId;
use crate::domain::transaction::{PaymentTransaction, TransactionStatus};
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const CONFIRMATION_MESSAGE: &str = "Payment successfully recorded.";

#[derive(Debug, Serialize, PartialEq)]
pub struct FeesInformation {
    pub enrollment_id: EnrollmentId,
    pub student_id: String,
    pub term: String,
    pub currency: String,
    pub summary: FeeSummary,
    pub fees_details: FeesDetails,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FeeSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_assessed_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FeesDetails {
    #[serde(with = "rust_decimal::serde::float")]
    pub tuition_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub computer_lab_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub athletic_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub library_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub miscellaneous_fees: Decimal,
}

impl From<&FeeStatement> for FeesInformation {
    fn from(statement: &FeeStatement) -> Self {
        let fees = &statement.assessment;
        let summary = &statement.summary;
        Self {
            enrollment_id: fees.enrollment_id,
            student_id: fees.student_id.clone(),
            term: fees.term.clone(),
            currency: fees.currency.clone(),
            summary: FeeSummary {
                total_assessed_fees: summary.total_assessed.value(),
                total_amount_paid: summary.total_paid.value(),
                remaining_balance: summary.remaining_balance.value(),
                payment_status: summary.payment_status,
            },
            fees_details: FeesDetails {
                tuition_fee: fees.tuition_fee.value(),
                computer_lab_fee: fees.computer_lab_fee.value(),
                athletic_fee: fees.athletic_fee.value(),
                library_fee: fees.library_fee.value(),
                miscellaneous_fees: fees.miscellaneous_total().value(),
            },
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PaymentInitiated {
    pub transaction_id: String,
    pub enrollment_id: EnrollmentId,
    pub status: TransactionStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
    pub payment_gateway_url: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&InitiatedPayment> for PaymentInitiated {
    fn from(initiated: &InitiatedPayment) -> Self {
        let tx = &initiated.transaction;
        Self {
            transaction_id: tx.transaction_id.to_string(),
            enrollment_id: tx.enrollment_id,
            status: tx.status,
            amount_due: tx.amount.value(),
            payment_gateway_url: initiated.checkout_url.clone(),
            timestamp: tx.transaction_timestamp,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PaymentConfirmed {
    pub transaction_id: String,
    pub status: TransactionStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub updated_balance: Decimal,
    pub message: &'static str,
}

impl From<&ConfirmedPayment> for PaymentConfirmed {
    fn from(confirmed: &ConfirmedPayment) -> Self {
        Self {
            transaction_id: confirmed.transaction.transaction_id.to_string(),
            status: confirmed.transaction.status,
            updated_balance: confirmed.balance.remaining_balance.value(),
            message: CONFIRMATION_MESSAGE,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TransactionDetails {
    pub transaction_id: String,
    pub date: DateTime<Utc>,
    pub student_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_paid: Decimal,
    pub payment_method: String,
    pub reference_number: Option<String>,
    pub status: TransactionStatus,
}

impl From<&TransactionDetail> for TransactionDetails {
    fn from(detail: &TransactionDetail) -> Self {
        let tx = &detail.transaction;
        Self {
            transaction_id: tx.transaction_id.to_string(),
            date: tx.transaction_timestamp,
            student_id: detail.student_id.clone(),
            amount_paid: tx.amount.value(),
            payment_method: tx.payment_method.clone(),
            reference_number: tx.transaction_ref.clone(),
            status: tx.status,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TransactionHistoryView {
    pub enrollment_id: EnrollmentId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    pub transactions: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub transaction_id: String,
    /// Calendar date only; the time of day is dropped in this view.
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub r#type: String,
}

impl From<&PaymentTransaction> for HistoryEntry {
    fn from(tx: &PaymentTransaction) -> Self {
        Self {
            transaction_id: tx.transaction_id.to_string(),
            date: tx.transaction_timestamp.format("%Y-%m-%d").to_string(),
            amount: tx.amount.value(),
            status: tx.status,
            r#type: tx.description.clone(),
        }
    }
}

impl From<&TransactionHistory> for TransactionHistoryView {
    fn from(history: &TransactionHistory) -> Self {
        Self {
            enrollment_id: history.enrollment_id,
            total_paid: history.total_paid.value(),
            transactions: history.transactions.iter().map(HistoryEntry::from).collect(),
        }
    }
}

/// Error body paired with the HTTP status the transport should use.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl From<&LedgerError> for ErrorResponse {
    fn from(err: &LedgerError) -> Self {
        Self {
            error: err.to_string(),
            status: err.status_code(),
        }
    }
}
