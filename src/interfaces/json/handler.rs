use super::requests::{PaymentCommand, PaymentRequest, Request};
use super::views::{
    FeesInformation, PaymentConfirmed, PaymentInitiated, TransactionDetails,
    TransactionHistoryView,
};
use crate::application::ledger::{PaymentConfirmation, PaymentInitiation, PaymentLedger};
use crate::domain::fee::EnrollmentId;
use crate::domain::transaction::{TransactionId, TransactionStatus};
use crate::error::Result;
use serde_json::Value;

/// Legacy combined endpoint: opens or settles a payment depending on the body.
pub async fn payment_transaction(
    ledger: &PaymentLedger,
    enrollment_id: EnrollmentId,
    body: PaymentRequest,
) -> Result<Value> {
    match body.into_command(enrollment_id)? {
        PaymentCommand::Initiate(request) => {
            let initiated = ledger.initiate_payment(request).await?;
            Ok(serde_json::to_value(PaymentInitiated::from(&initiated))?)
        }
        PaymentCommand::Confirm(request) => {
            let confirmed = ledger.confirm_payment(request).await?;
            Ok(serde_json::to_value(PaymentConfirmed::from(&confirmed))?)
        }
    }
}

/// Runs one request against the ledger and renders its wire response.
pub async fn handle(ledger: &PaymentLedger, request: Request) -> Result<Value> {
    let value = match request {
        Request::FeesInformation { enrollment_id } => {
            let statement = ledger.fee_information(enrollment_id).await?;
            serde_json::to_value(FeesInformation::from(&statement))?
        }
        Request::InitiatePayment {
            enrollment_id,
            amount,
            payment_method,
            description,
        } => {
            let initiated = ledger
                .initiate_payment(PaymentInitiation {
                    enrollment_id,
                    amount,
                    payment_method,
                    description,
                })
                .await?;
            serde_json::to_value(PaymentInitiated::from(&initiated))?
        }
        Request::ConfirmPayment {
            transaction_id,
            status_code,
            gateway_reference,
        } => {
            let confirmed = ledger
                .confirm_payment(PaymentConfirmation {
                    transaction_id: TransactionId::new(transaction_id),
                    status: status_code.parse::<TransactionStatus>()?,
                    gateway_reference,
                })
                .await?;
            serde_json::to_value(PaymentConfirmed::from(&confirmed))?
        }
        Request::TransactionDetails { transaction_id } => {
            let detail = ledger
                .transaction_details(&TransactionId::new(transaction_id))
                .await?;
            serde_json::to_value(TransactionDetails::from(&detail))?
        }
        Request::TransactionHistory { enrollment_id } => {
            let history = ledger.transaction_history(enrollment_id).await?;
            serde_json::to_value(TransactionHistoryView::from(&history))?
        }
        Request::PaymentTransaction {
            enrollment_id,
            body,
        } => payment_transaction(ledger, enrollment_id, body).await?,
    };
    Ok(value)
}
