use super::money::Money;
use serde::{Deserialize, Serialize};

pub type EnrollmentId = u32;

/// The fees owed for one enrollment in one term.
///
/// `total_assessed` is stored on its own and is authoritative; it is not
/// derived from the itemized fields.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct FeeAssessment {
    pub enrollment_id: EnrollmentId,
    pub student_id: String,
    pub term: String,
    pub currency: String,
    pub total_assessed: Money,
    pub tuition_fee: Money,
    pub computer_lab_fee: Money,
    pub athletic_fee: Money,
    pub library_fee: Money,
    pub cultural_fee: Money,
    pub internet_fee: Money,
    pub medical_dental_fee: Money,
    pub registration_fee: Money,
    pub school_pub_fee: Money,
    pub id_validation_fee: Money,
}

impl FeeAssessment {
    /// Sum of the six miscellaneous fee categories.
    pub fn miscellaneous_total(&self) -> Money {
        self.cultural_fee
            + self.internet_fee
            + self.medical_dental_fee
            + self.registration_fee
            + self.school_pub_fee
            + self.id_validation_fee
    }

    /// Sum of every itemized fee, for comparison against `total_assessed`.
    pub fn itemized_total(&self) -> Money {
        self.tuition_fee
            + self.computer_lab_fee
            + self.athletic_fee
            + self.library_fee
            + self.miscellaneous_total()
    }

    pub fn is_itemization_consistent(&self) -> bool {
        self.itemized_total() == self.total_assessed
    }
}
