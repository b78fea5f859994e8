use crate::domain::fee::{EnrollmentId, FeeAssessment};
use crate::domain::ports::{AssessmentWriter, FeeLedger, TransactionStore};
use crate::domain::transaction::{
    Confirmation, PaymentTransaction, TransactionId, TransactionStatus,
};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options, WriteBatch,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for fee assessments, keyed by big-endian enrollment id.
pub const CF_ASSESSMENTS: &str = "assessments";
/// Column Family for payment transactions, keyed by transaction id.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family indexing transactions by enrollment and creation time.
pub const CF_ENROLLMENT_INDEX: &str = "enrollment_index";

/// A persistent store implementation using RocksDB.
///
/// Serves both the fee ledger and the transaction store from separate
/// Column Families. Inserts and confirmations run under a shared write guard so
/// the check-then-write pairs behave like a single conditional statement.
///
/// `Clone` shares the underlying `Arc<DB>` and guard.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_guard: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path, creating the
    /// column families on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [CF_ASSESSMENTS, CF_TRANSACTIONS, CF_ENROLLMENT_INDEX]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_guard: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LedgerError::storage(std::io::Error::other(format!(
                "{} column family not found",
                name
            )))
        })
    }

    fn read_transaction(&self, transaction_id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        match self.db.get_cf(cf, transaction_id.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_transaction(&self, tx: &PaymentTransaction) -> Result<()> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        let value = serde_json::to_vec(tx)?;
        self.db.put_cf(cf, tx.transaction_id.as_str().as_bytes(), value)?;
        Ok(())
    }
}

fn index_key(tx: &PaymentTransaction) -> Vec<u8> {
    let created = tx.transaction_timestamp.timestamp_micros().max(0) as u64;
    let mut key = Vec::with_capacity(12 + tx.transaction_id.as_str().len());
    key.extend_from_slice(&tx.enrollment_id.to_be_bytes());
    key.extend_from_slice(&created.to_be_bytes());
    key.extend_from_slice(tx.transaction_id.as_str().as_bytes());
    key
}

#[async_trait]
impl FeeLedger for RocksDBStore {
    async fn get(&self, enrollment_id: EnrollmentId) -> Result<Option<FeeAssessment>> {
        let cf = self.cf(CF_ASSESSMENTS)?;
        match self.db.get_cf(cf, enrollment_id.to_be_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AssessmentWriter for RocksDBStore {
    async fn put(&self, assessment: FeeAssessment) -> Result<()> {
        let cf = self.cf(CF_ASSESSMENTS)?;
        let value = serde_json::to_vec(&assessment)?;
        self.db
            .put_cf(cf, assessment.enrollment_id.to_be_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn get(&self, transaction_id: &TransactionId) -> Result<Option<PaymentTransaction>> {
        self.read_transaction(transaction_id)
    }

    async fn list_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<PaymentTransaction>> {
        let index = self.cf(CF_ENROLLMENT_INDEX)?;
        let prefix = enrollment_id.to_be_bytes();

        let mut transactions = Vec::new();
        let iter = self
            .db
            .iterator_cf(index, IteratorMode::From(&prefix[..], Direction::Forward));
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            let id = String::from_utf8_lossy(&key[12..]).into_owned();
            if let Some(tx) = self.read_transaction(&TransactionId::new(id))? {
                transactions.push(tx);
            }
        }

        Ok(transactions)
    }

    async fn insert(&self, tx: PaymentTransaction) -> Result<()> {
        let _guard = self.write_guard.lock().await;

        let cf = self.cf(CF_TRANSACTIONS)?;
        // Just check if the key exists without retrieving the value
        if self
            .db
            .get_pinned_cf(cf, tx.transaction_id.as_str().as_bytes())?
            .is_some()
        {
            return Err(LedgerError::DuplicateTransaction(
                tx.transaction_id.to_string(),
            ));
        }

        // Row and index entry land together or not at all.
        let index = self.cf(CF_ENROLLMENT_INDEX)?;
        let mut batch = WriteBatch::default();
        batch.put_cf(cf, tx.transaction_id.as_str().as_bytes(), serde_json::to_vec(&tx)?);
        batch.put_cf(index, index_key(&tx), b"");
        self.db.write(batch)?;
        Ok(())
    }

    async fn confirm(&self, transaction_id: &TransactionId, update: Confirmation) -> Result<u64> {
        let _guard = self.write_guard.lock().await;

        match self.read_transaction(transaction_id)? {
            Some(mut tx) if tx.status == TransactionStatus::Pending => {
                tx.apply(&update);
                self.write_transaction(&tx)?;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
