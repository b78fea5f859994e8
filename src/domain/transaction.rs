use super::fee::EnrollmentId;
use super::money::Amount;
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub const PREFIX: &'static str = "TXN-";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
        }
    }

    /// PENDING may settle as COMPLETED or FAILED; settled states are final.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (
                TransactionStatus::Pending,
                TransactionStatus::Completed | TransactionStatus::Failed
            )
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(LedgerError::InvalidRequest(format!(
                "unknown status code '{}'",
                other
            ))),
        }
    }
}

/// A single payment attempt against an enrollment.
///
/// Only `status`, `transaction_ref` and `transaction_timestamp` ever change,
/// and only through a confirmation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentTransaction {
    pub transaction_id: TransactionId,
    pub enrollment_id: EnrollmentId,
    pub amount: Amount,
    pub currency: String,
    pub payment_method: String,
    pub description: String,
    pub status: TransactionStatus,
    pub transaction_ref: Option<String>,
    pub transaction_timestamp: DateTime<Utc>,
}

impl PaymentTransaction {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Applies a confirmation. The confirmation time replaces the creation
    /// time.
    pub fn apply(&mut self, update: &Confirmation) {
        self.status = update.status;
        self.transaction_ref = update.gateway_reference.clone();
        self.transaction_timestamp = update.confirmed_at;
    }
}

/// The mutable fields written by a gateway confirmation.
#[derive(Debug, PartialEq, Clone)]
pub struct Confirmation {
    pub status: TransactionStatus,
    pub gateway_reference: Option<String>,
    pub confirmed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "COMPLETED".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Completed
        );
        assert_eq!(
            " failed ".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Failed
        );
        assert!(matches!(
            "REFUNDED".parse::<TransactionStatus>(),
            Err(LedgerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_transition_table() {
        use TransactionStatus::*;
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&TransactionStatus::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
    }

    #[test]
    fn test_apply_overwrites_timestamp() {
        let created = "2024-08-01T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let confirmed = "2024-08-02T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut tx = PaymentTransaction {
            transaction_id: "TXN-1".into(),
            enrollment_id: 1,
            amount: Amount::new(dec!(20000)).unwrap(),
            currency: "PHP".to_string(),
            payment_method: "GCash".to_string(),
            description: "Downpayment".to_string(),
            status: TransactionStatus::Pending,
            transaction_ref: None,
            transaction_timestamp: created,
        };

        tx.apply(&Confirmation {
            status: TransactionStatus::Completed,
            gateway_reference: Some("GW-778".to_string()),
            confirmed_at: confirmed,
        });

        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.transaction_ref.as_deref(), Some("GW-778"));
        assert_eq!(tx.transaction_timestamp, confirmed);
    }
}
