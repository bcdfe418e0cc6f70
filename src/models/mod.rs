pub mod medication;
pub mod patient;
pub mod report;

pub use medication::*;
pub use patient::*;
pub use report::*;

use serde::{Deserialize, Serialize};

/// Input to one analysis invocation, as handed over by the prescription
/// workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub medications: Vec<PrescribedMedication>,
    pub patient: PatientContext,
}
