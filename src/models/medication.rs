use serde::{Deserialize, Serialize};

/// Class assigned when the catalog has no entry for a prescribed name.
pub const UNKNOWN_DRUG_CLASS: &str = "Unknown";

/// Marker for catalog free-text fields with no data. Never empty string or
/// null, so downstream prompt interpolation always has something to print.
pub const NOT_AVAILABLE: &str = "Not available";

/// One catalog entry of curated reference data for a medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationReference {
    pub name: String,
    pub generic_name: String,
    /// Comma-separated brand names; participates in catalog matching.
    pub brand_names: String,
    pub drug_class: String,
    /// Free-text description of known interactions.
    pub known_interactions: String,
    /// Free-text contraindication notes.
    pub contraindications: String,
    pub indications: String,
}

impl MedicationReference {
    /// Placeholder reference for a medication absent from the catalog.
    /// Every field is populated so no consumer has to branch on missing data.
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            generic_name: name.to_string(),
            brand_names: NOT_AVAILABLE.to_string(),
            drug_class: UNKNOWN_DRUG_CLASS.to_string(),
            known_interactions: NOT_AVAILABLE.to_string(),
            contraindications: NOT_AVAILABLE.to_string(),
            indications: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One prescription line item as entered by the prescriber.
/// The name may embed a strength, e.g. "Lisinopril (10mg)".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescribedMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A prescribed medication joined with its best-matching catalog entry.
/// Every prescribed item produces exactly one of these, degrading to an
/// "Unknown"-class reference when the catalog has nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMedication {
    pub prescribed: PrescribedMedication,
    pub reference: MedicationReference,
}

impl EnrichedMedication {
    pub fn drug_class(&self) -> &str {
        &self.reference.drug_class
    }

    /// Whether the catalog resolved a real pharmacological class.
    pub fn has_known_class(&self) -> bool {
        self.reference.drug_class != UNKNOWN_DRUG_CLASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_reference_has_no_empty_fields() {
        let r = MedicationReference::unknown("Obscuratol");
        assert_eq!(r.name, "Obscuratol");
        assert_eq!(r.drug_class, UNKNOWN_DRUG_CLASS);
        assert_eq!(r.known_interactions, NOT_AVAILABLE);
        assert_eq!(r.contraindications, NOT_AVAILABLE);
        assert_eq!(r.indications, NOT_AVAILABLE);
    }

    #[test]
    fn enriched_unknown_class_detection() {
        let e = EnrichedMedication {
            prescribed: PrescribedMedication {
                name: "Obscuratol".into(),
                dosage: "5mg".into(),
                frequency: "once daily".into(),
                duration: None,
            },
            reference: MedicationReference::unknown("Obscuratol"),
        };
        assert!(!e.has_known_class());
        assert_eq!(e.drug_class(), "Unknown");
    }
}
