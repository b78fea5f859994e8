use chrono::Utc;
use rust_decimal_macros::dec;
use tuition_ledger::domain::money::{Amount, Money};
use tuition_ledger::domain::ports::{FeeLedgerBox, TransactionStoreBox};
use tuition_ledger::domain::transaction::{PaymentTransaction, TransactionId, TransactionStatus};
use tuition_ledger::infrastructure::in_memory::{InMemoryFeeLedger, InMemoryTransactionStore};

mod common;

#[tokio::test]
async fn test_stores_as_trait_objects() {
    let seed = InMemoryFeeLedger::new();
    tuition_ledger::domain::ports::AssessmentWriter::put(
        &seed,
        common::assessment(1, Money::new(dec!(100.0))),
    )
    .await
    .unwrap();

    let fee_ledger: FeeLedgerBox = Box::new(seed);
    let transaction_store: TransactionStoreBox = Box::new(InMemoryTransactionStore::new());

    let tx = PaymentTransaction {
        transaction_id: TransactionId::new("TXN-1"),
        enrollment_id: 1,
        amount: Amount::new(dec!(100.0)).unwrap(),
        currency: "PHP".to_string(),
        payment_method: "Cash".to_string(),
        description: "Tuition".to_string(),
        status: TransactionStatus::Pending,
        transaction_ref: None,
        transaction_timestamp: Utc::now(),
    };

    // Verify Send + Sync by spawning tasks
    let fl_handle = tokio::spawn(async move { fee_ledger.get(1).await.unwrap().unwrap() });

    let ts_handle = tokio::spawn(async move {
        transaction_store.insert(tx).await.unwrap();
        transaction_store
            .get(&TransactionId::new("TXN-1"))
            .await
            .unwrap()
            .unwrap()
    });

    let retrieved_assessment = fl_handle.await.unwrap();
    assert_eq!(retrieved_assessment.enrollment_id, 1);

    let retrieved_tx = ts_handle.await.unwrap();
    assert_eq!(retrieved_tx.transaction_id.as_str(), "TXN-1");
}
