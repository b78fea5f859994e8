use crate::config::LedgerConfig;
use crate::domain::balance::{self, BalanceSummary};
use crate::domain::fee::{EnrollmentId, FeeAssessment};
use crate::domain::ids::{IdGeneratorBox, RandomIdGenerator};
use crate::domain::money::{Amount, Money};
use crate::domain::ports::{FeeLedgerBox, TransactionStoreBox};
use crate::domain::transaction::{
    Confirmation, PaymentTransaction, TransactionId, TransactionStatus,
};
use crate::error::{LedgerError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Request to open a new payment against an enrollment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInitiation {
    pub enrollment_id: EnrollmentId,
    pub amount: Decimal,
    pub payment_method: String,
    pub description: String,
}

/// Gateway callback settling a pending payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub transaction_id: TransactionId,
    pub status: TransactionStatus,
    pub gateway_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeStatement {
    pub assessment: FeeAssessment,
    pub summary: BalanceSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitiatedPayment {
    pub transaction: PaymentTransaction,
    pub checkout_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedPayment {
    pub transaction: PaymentTransaction,
    pub balance: BalanceSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetail {
    pub transaction: PaymentTransaction,
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHistory {
    pub enrollment_id: EnrollmentId,
    pub total_paid: Money,
    pub transactions: Vec<PaymentTransaction>,
}

/// Entry point for fee lookups and the payment lifecycle.
///
/// The ledger keeps no state of its own between calls. Every operation reads
/// through the injected stores, so several callers may share one instance
/// (behind an `Arc`) and race freely; confirmation races are settled by the
/// store's conditional update.
pub struct PaymentLedger {
    fee_ledger: FeeLedgerBox,
    transaction_store: TransactionStoreBox,
    ids: IdGeneratorBox,
    config: LedgerConfig,
}

impl PaymentLedger {
    /// Creates a ledger with the default configuration and random identifiers.
    ///
    /// # Arguments
    ///
    /// * `fee_ledger` - Source of fee assessments.
    /// * `transaction_store` - Store for payment transactions.
    pub fn new(fee_ledger: FeeLedgerBox, transaction_store: TransactionStoreBox) -> Self {
        Self {
            fee_ledger,
            transaction_store,
            ids: Box::new(RandomIdGenerator),
            config: LedgerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id_generator(mut self, ids: IdGeneratorBox) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    async fn assessment(&self, enrollment_id: EnrollmentId) -> Result<FeeAssessment> {
        self.fee_ledger
            .get(enrollment_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Enrollment {}", enrollment_id)))
    }

    async fn transaction(&self, transaction_id: &TransactionId) -> Result<PaymentTransaction> {
        self.transaction_store
            .get(transaction_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction {}", transaction_id)))
    }

    /// Current balance of an enrollment, counting COMPLETED payments only.
    pub async fn balance(&self, enrollment_id: EnrollmentId) -> Result<BalanceSummary> {
        let assessment = self.assessment(enrollment_id).await?;
        let transactions = self
            .transaction_store
            .list_by_enrollment(enrollment_id)
            .await?;
        Ok(balance::summarize(&assessment, &transactions))
    }

    /// Fee breakdown and balance summary for one enrollment.
    pub async fn fee_information(&self, enrollment_id: EnrollmentId) -> Result<FeeStatement> {
        let assessment = self.assessment(enrollment_id).await?;
        if !assessment.is_itemization_consistent() {
            warn!(
                enrollment_id,
                total_assessed = %assessment.total_assessed.value(),
                itemized_total = %assessment.itemized_total().value(),
                "itemized fees do not add up to the assessed total"
            );
        }

        let transactions = self
            .transaction_store
            .list_by_enrollment(enrollment_id)
            .await?;
        let summary = balance::summarize(&assessment, &transactions);
        debug!(enrollment_id, status = %summary.payment_status, "fee information read");

        Ok(FeeStatement {
            assessment,
            summary,
        })
    }

    /// Records a new PENDING payment and hands back the checkout URL.
    ///
    /// The amount is not checked against the remaining balance; overpayment is
    /// accepted.
    pub async fn initiate_payment(&self, request: PaymentInitiation) -> Result<InitiatedPayment> {
        let amount = Amount::new(request.amount)?;
        self.assessment(request.enrollment_id).await?;

        let attempts = self.config.id_attempts.max(1);
        for attempt in 1..=attempts {
            let tx = PaymentTransaction {
                transaction_id: self.ids.transaction_id(),
                enrollment_id: request.enrollment_id,
                amount,
                currency: self.config.currency.clone(),
                payment_method: request.payment_method.clone(),
                description: request.description.clone(),
                status: TransactionStatus::Pending,
                transaction_ref: None,
                transaction_timestamp: Utc::now(),
            };

            match self.transaction_store.insert(tx.clone()).await {
                Ok(()) => {
                    info!(
                        transaction_id = %tx.transaction_id,
                        enrollment_id = tx.enrollment_id,
                        amount = %amount.value(),
                        "payment initiated"
                    );
                    let checkout_url = self.config.checkout_url(&self.ids.checkout_token());
                    return Ok(InitiatedPayment {
                        transaction: tx,
                        checkout_url,
                    });
                }
                Err(LedgerError::DuplicateTransaction(id)) => {
                    warn!(transaction_id = %id, attempt, "transaction id collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(LedgerError::IdentifierExhausted(attempts))
    }

    /// Settles a PENDING payment and returns the recomputed balance.
    ///
    /// Exactly one of several conflicting confirmations for the same
    /// transaction succeeds; the others fail with `InvalidTransition`. A
    /// redelivery carrying the status and gateway reference already stored is
    /// acknowledged again, so a gateway that lost the first answer can retry.
    pub async fn confirm_payment(&self, request: PaymentConfirmation) -> Result<ConfirmedPayment> {
        let transaction_id = request.transaction_id;
        let rejected = |from: TransactionStatus| LedgerError::InvalidTransition {
            transaction_id: transaction_id.to_string(),
            from: from.to_string(),
            to: request.status.to_string(),
        };

        if !TransactionStatus::Pending.can_transition_to(request.status) {
            return Err(rejected(TransactionStatus::Pending));
        }

        let update = Confirmation {
            status: request.status,
            gateway_reference: request.gateway_reference.clone(),
            confirmed_at: Utc::now(),
        };
        let changed = self.transaction_store.confirm(&transaction_id, update).await?;

        if changed == 0 {
            let current = self.transaction(&transaction_id).await?;
            if current.status == request.status
                && current.transaction_ref == request.gateway_reference
            {
                info!(
                    transaction_id = %transaction_id,
                    status = %current.status,
                    "repeated confirmation acknowledged"
                );
                let balance = self.balance(current.enrollment_id).await?;
                return Ok(ConfirmedPayment {
                    transaction: current,
                    balance,
                });
            }
            warn!(
                transaction_id = %transaction_id,
                current = %current.status,
                requested = %request.status,
                "confirmation rejected"
            );
            return Err(rejected(current.status));
        }

        let transaction = self.transaction(&transaction_id).await?;
        let balance = self.balance(transaction.enrollment_id).await?;
        info!(
            transaction_id = %transaction_id,
            status = %transaction.status,
            remaining = %balance.remaining_balance.value(),
            "payment confirmed"
        );

        Ok(ConfirmedPayment {
            transaction,
            balance,
        })
    }

    /// One transaction together with the student it was paid for.
    pub async fn transaction_details(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<TransactionDetail> {
        let transaction = self.transaction(transaction_id).await?;
        let assessment = self
            .fee_ledger
            .get(transaction.enrollment_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction {}", transaction_id)))?;

        Ok(TransactionDetail {
            transaction,
            student_id: assessment.student_id,
        })
    }

    /// Every payment attempt of an enrollment, oldest first.
    ///
    /// An enrollment without transactions yields an empty history.
    pub async fn transaction_history(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<TransactionHistory> {
        let transactions = self
            .transaction_store
            .list_by_enrollment(enrollment_id)
            .await?;
        let total_paid = balance::completed_total(&transactions);
        debug!(enrollment_id, count = transactions.len(), "transaction history read");

        Ok(TransactionHistory {
            enrollment_id,
            total_paid,
            transactions,
        })
    }
}
