use crate::domain::fee::FeeAssessment;
use crate::error::{LedgerError, Result};
use std::io::Read;

/// Reads fee assessments from a CSV export of the enrollment system.
///
/// Expects a header row naming the `FeeAssessment` fields. Whitespace around
/// fields is trimmed.
pub struct AssessmentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AssessmentReader<R> {
    /// Creates a new `AssessmentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes assessments.
    ///
    /// A malformed row yields an error for that row only; iteration continues.
    pub fn assessments(self) -> impl Iterator<Item = Result<FeeAssessment>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    const HEADER: &str = "enrollment_id, student_id, term, currency, total_assessed, tuition_fee, computer_lab_fee, athletic_fee, library_fee, cultural_fee, internet_fee, medical_dental_fee, registration_fee, school_pub_fee, id_validation_fee";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{}\n1, 2024-00001, 1st Sem 2024, PHP, 50000, 42000, 2500, 800, 1200, 500, 1000, 700, 900, 150, 250\n2, 2024-00002, 1st Sem 2024, PHP, 30000.50, 30000.50, 0, 0, 0, 0, 0, 0, 0, 0, 0",
            HEADER
        );
        let reader = AssessmentReader::new(data.as_bytes());
        let results: Vec<Result<FeeAssessment>> = reader.assessments().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.enrollment_id, 1);
        assert_eq!(first.student_id, "2024-00001");
        assert_eq!(first.term, "1st Sem 2024");
        assert_eq!(first.total_assessed, Money::new(dec!(50000)));
        assert_eq!(first.miscellaneous_total(), Money::new(dec!(3500)));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.tuition_fee, Money::new(dec!(30000.50)));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!(
            "{}\nabc, 2024-00001, 1st Sem 2024, PHP, 50000, 42000, 2500, 800, 1200, 500, 1000, 700, 900, 150, 250\n3, 2024-00003, 1st Sem 2024, PHP, 10, 10, 0, 0, 0, 0, 0, 0, 0, 0, 0",
            HEADER
        );
        let reader = AssessmentReader::new(data.as_bytes());
        let results: Vec<Result<FeeAssessment>> = reader.assessments().collect();

        assert!(matches!(results[0], Err(LedgerError::Csv(_))));
        assert_eq!(results[1].as_ref().unwrap().enrollment_id, 3);
    }
}
