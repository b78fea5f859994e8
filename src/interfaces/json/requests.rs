use crate::application::ledger::{PaymentConfirmation, PaymentInitiation};
use crate::domain::fee::EnrollmentId;
use crate::domain::transaction::{TransactionId, TransactionStatus};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of the legacy `POST /enrollment/{id}/payment_transactions` endpoint.
///
/// The same endpoint both opens and settles payments; which one is meant is
/// inferred from the fields present.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub transaction_id: Option<String>,
    pub status_code: Option<String>,
    pub gateway_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentCommand {
    Initiate(PaymentInitiation),
    Confirm(PaymentConfirmation),
}

impl PaymentRequest {
    /// A non-zero `amount` means initiate; otherwise `transaction_id` plus
    /// `status_code` means confirm. A zero amount counts as absent.
    pub fn into_command(self, enrollment_id: EnrollmentId) -> Result<PaymentCommand> {
        match self {
            PaymentRequest {
                amount: Some(amount),
                payment_method,
                description,
                ..
            } if !amount.is_zero() => Ok(PaymentCommand::Initiate(PaymentInitiation {
                enrollment_id,
                amount,
                payment_method: payment_method.unwrap_or_default(),
                description: description.unwrap_or_default(),
            })),
            PaymentRequest {
                transaction_id: Some(transaction_id),
                status_code: Some(status_code),
                gateway_reference,
                ..
            } if !transaction_id.is_empty() && !status_code.is_empty() => {
                Ok(PaymentCommand::Confirm(PaymentConfirmation {
                    transaction_id: TransactionId::new(transaction_id),
                    status: status_code.parse::<TransactionStatus>()?,
                    gateway_reference,
                }))
            }
            _ => Err(LedgerError::InvalidRequest(
                "Invalid request format".to_string(),
            )),
        }
    }
}

/// One operation in a replay file, one JSON object per line.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    FeesInformation {
        enrollment_id: EnrollmentId,
    },
    InitiatePayment {
        enrollment_id: EnrollmentId,
        amount: Decimal,
        #[serde(default)]
        payment_method: String,
        #[serde(default)]
        description: String,
    },
    ConfirmPayment {
        transaction_id: String,
        status_code: String,
        #[serde(default)]
        gateway_reference: Option<String>,
    },
    TransactionDetails {
        transaction_id: String,
    },
    TransactionHistory {
        enrollment_id: EnrollmentId,
    },
    /// The legacy combined endpoint.
    PaymentTransaction {
        enrollment_id: EnrollmentId,
        body: PaymentRequest,
    },
}
