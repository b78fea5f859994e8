use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tuition_ledger::application::ledger::PaymentLedger;
use tuition_ledger::config::{
    DEFAULT_CURRENCY, DEFAULT_GATEWAY_URL, DEFAULT_ID_ATTEMPTS, LedgerConfig,
};
use tuition_ledger::domain::ports::{AssessmentWriterBox, FeeLedgerBox, TransactionStoreBox};
use tuition_ledger::infrastructure::in_memory::{InMemoryFeeLedger, InMemoryTransactionStore};
use tuition_ledger::interfaces::csv::assessment_reader::AssessmentReader;
use tuition_ledger::interfaces::json::handler;
use tuition_ledger::interfaces::json::requests::Request;
use tuition_ledger::interfaces::json::views::ErrorResponse;
use tuition_ledger::telemetry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Fee assessments CSV to load before running the command
    #[arg(long, global = true)]
    fees: Option<PathBuf>,

    /// Currency recorded on new transactions
    #[arg(long, env = "LEDGER_CURRENCY", default_value = DEFAULT_CURRENCY, global = true)]
    currency: String,

    /// Payment gateway checkout URL
    #[arg(long, env = "LEDGER_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL, global = true)]
    gateway_url: String,

    /// Transaction id attempts before giving up on a collision
    #[arg(long, default_value_t = DEFAULT_ID_ATTEMPTS, global = true)]
    id_attempts: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load fee assessments from a CSV file
    Import { file: PathBuf },
    /// Show fee breakdown and balance of an enrollment
    Fees { enrollment_id: u32 },
    /// Initiate a payment
    Pay {
        enrollment_id: u32,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        method: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Confirm a pending payment with the gateway's verdict
    Confirm {
        transaction_id: String,
        #[arg(long)]
        status: String,
        #[arg(long)]
        reference: Option<String>,
    },
    /// Show one transaction
    Transaction { transaction_id: String },
    /// List the transactions of an enrollment
    History { enrollment_id: u32 },
    /// Run a JSON-lines file of requests, printing one response per line
    Replay { file: PathBuf },
}

struct Stores {
    fees: FeeLedgerBox,
    writer: AssessmentWriterBox,
    transactions: TransactionStoreBox,
}

fn in_memory_stores() -> Stores {
    let fees = InMemoryFeeLedger::new();
    Stores {
        fees: Box::new(fees.clone()),
        writer: Box::new(fees),
        transactions: Box::new(InMemoryTransactionStore::new()),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<Stores> {
    use tuition_ledger::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Stores {
                fees: Box::new(store.clone()),
                writer: Box::new(store.clone()),
                transactions: Box::new(store),
            })
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<Stores> {
    if db_path.is_some() {
        const FALLBACK: &str = "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage.";
        // Printed regardless of RUST_LOG.
        eprintln!("Warning: {}", FALLBACK);
        tracing::warn!("{}", FALLBACK);
    }
    Ok(in_memory_stores())
}

async fn import(writer: &AssessmentWriterBox, path: &Path) -> Result<usize> {
    let file = File::open(path).into_diagnostic()?;
    let reader = AssessmentReader::new(file);
    let mut imported = 0;
    for row in reader.assessments() {
        match row {
            Ok(assessment) => {
                writer.put(assessment).await.into_diagnostic()?;
                imported += 1;
            }
            Err(e) => {
                eprintln!("Error reading assessment: {}", e);
            }
        }
    }
    tracing::info!(imported, file = %path.display(), "fee assessments imported");
    Ok(imported)
}

async fn replay(ledger: &PaymentLedger, path: &Path) -> Result<()> {
    let file = File::open(path).into_diagnostic()?;
    for line in BufReader::new(file).lines() {
        let line = line.into_diagnostic()?;
        if line.trim().is_empty() {
            continue;
        }
        let request: Request = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Error reading request: {}", e);
                continue;
            }
        };
        match handler::handle(ledger, request).await {
            Ok(response) => println!("{}", response),
            Err(e) => {
                eprintln!("Error processing request: {}", e);
                let body = serde_json::to_string(&ErrorResponse::from(&e)).into_diagnostic()?;
                println!("{}", body);
            }
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let stores = open_stores(cli.db_path)?;
    if let Some(path) = &cli.fees {
        import(&stores.writer, path).await?;
    }

    let config = LedgerConfig {
        currency: cli.currency,
        gateway_url: cli.gateway_url,
        id_attempts: cli.id_attempts,
    };
    let ledger = PaymentLedger::new(stores.fees, stores.transactions).with_config(config);

    let request = match cli.command {
        Command::Import { file } => {
            let imported = import(&stores.writer, &file).await?;
            return print_json(&serde_json::json!({ "imported": imported }));
        }
        Command::Replay { file } => return replay(&ledger, &file).await,
        Command::Fees { enrollment_id } => Request::FeesInformation { enrollment_id },
        Command::Pay {
            enrollment_id,
            amount,
            method,
            description,
        } => Request::InitiatePayment {
            enrollment_id,
            amount,
            payment_method: method,
            description,
        },
        Command::Confirm {
            transaction_id,
            status,
            reference,
        } => Request::ConfirmPayment {
            transaction_id,
            status_code: status,
            gateway_reference: reference,
        },
        Command::Transaction { transaction_id } => Request::TransactionDetails { transaction_id },
        Command::History { enrollment_id } => Request::TransactionHistory { enrollment_id },
    };

    let response = handler::handle(&ledger, request).await.into_diagnostic()?;
    print_json(&response)
}
