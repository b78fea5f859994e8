use super::fee::FeeAssessment;
use super::money::Money;
use super::transaction::PaymentTransaction;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentStatus {
    #[serde(rename = "Paid in Full")]
    PaidInFull,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PaidInFull => "Paid in Full",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an enrollment stands against its assessment.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct BalanceSummary {
    pub total_assessed: Money,
    pub total_paid: Money,
    /// Negative when overpaid.
    pub remaining_balance: Money,
    pub payment_status: PaymentStatus,
}

/// Sum of COMPLETED amounts. Pending and failed attempts never count.
pub fn completed_total<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a PaymentTransaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.is_completed())
        .map(|tx| Money::from(tx.amount))
        .sum()
}

/// The full-payment check wins over the partial check.
pub fn classify(total_paid: Money, remaining_balance: Money) -> PaymentStatus {
    if remaining_balance <= Money::ZERO {
        PaymentStatus::PaidInFull
    } else if total_paid.is_positive() {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}

pub fn summarize(assessment: &FeeAssessment, transactions: &[PaymentTransaction]) -> BalanceSummary {
    let total_paid = completed_total(transactions);
    let remaining_balance = assessment.total_assessed - total_paid;

    BalanceSummary {
        total_assessed: assessment.total_assessed,
        total_paid,
        remaining_balance,
        payment_status: classify(total_paid, remaining_balance),
    }
}
