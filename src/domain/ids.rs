use super::transaction::TransactionId;
use rand::Rng;
use rand::rngs::OsRng;

/// Source of transaction identifiers and gateway checkout tokens.
pub trait IdGenerator: Send + Sync {
    fn transaction_id(&self) -> TransactionId;
    fn checkout_token(&self) -> String;
}

pub type IdGeneratorBox = Box<dyn IdGenerator>;

/// Draws from the operating system CSPRNG.
///
/// Identifiers carry 128 random bits as 32 upper-case hex digits after the
/// `TXN-` prefix. The store still enforces uniqueness.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn transaction_id(&self) -> TransactionId {
        let mut rng = OsRng;
        let value: u128 = rng.r#gen();
        TransactionId::new(format!("{}{:032X}", TransactionId::PREFIX, value))
    }

    fn checkout_token(&self) -> String {
        let mut rng = OsRng;
        let value: u64 = rng.r#gen();
        format!("{:016x}", value)
    }
}
