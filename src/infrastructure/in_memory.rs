use crate::domain::fee::{EnrollmentId, FeeAssessment};
use crate::domain::ports::{AssessmentWriter, FeeLedger, TransactionStore};
use crate::domain::transaction::{
    Confirmation, PaymentTransaction, TransactionId, TransactionStatus,
};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory fee ledger.
///
/// Clones share the same underlying map, so one clone can be handed to the
/// importer and another to the payment ledger.
#[derive(Default, Clone)]
pub struct InMemoryFeeLedger {
    assessments: Arc<RwLock<HashMap<EnrollmentId, FeeAssessment>>>,
}

impl InMemoryFeeLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeeLedger for InMemoryFeeLedger {
    async fn get(&self, enrollment_id: EnrollmentId) -> Result<Option<FeeAssessment>> {
        let assessments = self.assessments.read().await;
        Ok(assessments.get(&enrollment_id).cloned())
    }
}

#[async_trait]
impl AssessmentWriter for InMemoryFeeLedger {
    async fn put(&self, assessment: FeeAssessment) -> Result<()> {
        let mut assessments = self.assessments.write().await;
        assessments.insert(assessment.enrollment_id, assessment);
        Ok(())
    }
}

#[derive(Default)]
struct TransactionTable {
    rows: HashMap<TransactionId, PaymentTransaction>,
    // insertion order per enrollment
    by_enrollment: HashMap<EnrollmentId, Vec<TransactionId>>,
}

/// A thread-safe in-memory transaction store.
///
/// Every mutation happens under one write lock, which is what makes the
/// conditional confirm atomic.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    table: Arc<RwLock<TransactionTable>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn get(&self, transaction_id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        let table = self.table.read().await;
        Ok(table.rows.get(transaction_id).cloned())
    }

    async fn list_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<PaymentTransaction>> {
        let table = self.table.read().await;
        let ids = match table.by_enrollment.get(&enrollment_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn insert(&self, tx: PaymentTransaction) -> Result<()> {
        let mut table = self.table.write().await;
        if table.rows.contains_key(&tx.transaction_id) {
            return Err(LedgerError::DuplicateTransaction(
                tx.transaction_id.to_string(),
            ));
        }
        table
            .by_enrollment
            .entry(tx.enrollment_id)
            .or_default()
            .push(tx.transaction_id.clone());
        table.rows.insert(tx.transaction_id.clone(), tx);
        Ok(())
    }

    async fn confirm(&self, transaction_id: &TransactionId, update: Confirmation) -> Result<u64> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(transaction_id) {
            Some(tx) if tx.status == TransactionStatus::Pending => {
                tx.apply(&update);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
