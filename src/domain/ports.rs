use super::fee::{EnrollmentId, FeeAssessment};
use super::transaction::{Confirmation, PaymentTransaction, TransactionId};
use crate::error::Result;
use async_trait::async_trait;

/// Read access to fee assessments. Assessments are written by the enrollment
/// process, never by the ledger core.
#[async_trait]
pub trait FeeLedger: Send + Sync {
    async fn get(&self, enrollment_id: EnrollmentId) -> Result<Option<FeeAssessment>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn get(&self, transaction_id: &TransactionId) -> Result<Option<PaymentTransaction>>;

    /// Transactions of one enrollment, oldest first.
    async fn list_by_enrollment(&self, enrollment_id: EnrollmentId)
    -> Result<Vec<PaymentTransaction>>;

    /// Inserts a new transaction. Fails with `LedgerError::DuplicateTransaction`
    /// if the identifier is already taken.
    async fn insert(&self, tx: PaymentTransaction) -> Result<()>;

    /// Atomically applies `update` to the transaction with this identifier,
    /// but only while it is still PENDING. Returns the number of rows changed
    /// (0 or 1).
    async fn confirm(&self, transaction_id: &TransactionId, update: Confirmation) -> Result<u64>;
}

pub type FeeLedgerBox = Box<dyn FeeLedger>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;

/// Write side of the fee ledger, used to seed assessments handed over by the
/// enrollment process.
#[async_trait]
pub trait AssessmentWriter: Send + Sync {
    async fn put(&self, assessment: FeeAssessment) -> Result<()>;
}

pub type AssessmentWriterBox = Box<dyn AssessmentWriter>;
