#![allow(dead_code)]

use std::fs::File;
use std::io::Error;
use std::path::Path;
use tuition_ledger::application::ledger::PaymentLedger;
use tuition_ledger::domain::fee::FeeAssessment;
use tuition_ledger::domain::money::Money;
use tuition_ledger::domain::ports::AssessmentWriter;
use tuition_ledger::infrastructure::in_memory::{InMemoryFeeLedger, InMemoryTransactionStore};

pub const FEES_FIXTURE: &str = "tests/fixtures/fees.csv";

const HEADER: [&str; 15] = [
    "enrollment_id",
    "student_id",
    "term",
    "currency",
    "total_assessed",
    "tuition_fee",
    "computer_lab_fee",
    "athletic_fee",
    "library_fee",
    "cultural_fee",
    "internet_fee",
    "medical_dental_fee",
    "registration_fee",
    "school_pub_fee",
    "id_validation_fee",
];

/// Writes `rows` assessments of 10,000 each, all tuition.
pub fn generate_fees_csv(path: &Path, rows: u32) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let id = i.to_string();
        let student = format!("S-{:06}", i);
        wtr.write_record([
            id.as_str(),
            student.as_str(),
            "Summer 2025",
            "PHP",
            "10000",
            "10000",
            "0",
            "0",
            "0",
            "0",
            "0",
            "0",
            "0",
            "0",
            "0",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn assessment(enrollment_id: u32, total: Money) -> FeeAssessment {
    FeeAssessment {
        enrollment_id,
        student_id: format!("S-{:06}", enrollment_id),
        term: "Summer 2025".to_string(),
        currency: "PHP".to_string(),
        total_assessed: total,
        tuition_fee: total,
        computer_lab_fee: Money::ZERO,
        athletic_fee: Money::ZERO,
        library_fee: Money::ZERO,
        cultural_fee: Money::ZERO,
        internet_fee: Money::ZERO,
        medical_dental_fee: Money::ZERO,
        registration_fee: Money::ZERO,
        school_pub_fee: Money::ZERO,
        id_validation_fee: Money::ZERO,
    }
}

/// In-memory ledger seeded with the given assessments.
pub async fn ledger_with(assessments: Vec<FeeAssessment>) -> PaymentLedger {
    let fees = InMemoryFeeLedger::new();
    for assessment in assessments {
        fees.put(assessment).await.unwrap();
    }
    PaymentLedger::new(Box::new(fees), Box::new(InMemoryTransactionStore::new()))
}
