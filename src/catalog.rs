use std::path::Path;

use thiserror::Error;

use crate::models::MedicationReference;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file {0}: {1}")]
    Load(String, String),

    #[error("failed to parse catalog file {0}: {1}")]
    Parse(String, String),

    #[error("catalog query failed: {0}")]
    Query(String),
}

/// Read-only medication catalog collaborator. Implementations must be safe
/// to share across concurrent analyses (`&self` queries only).
pub trait MedicationCatalog {
    /// Case-insensitive substring match on name, generic name, or brand
    /// names; returns at most one record (first match, the catalog is
    /// assumed small and curated).
    fn find(&self, query: &str) -> Result<Option<MedicationReference>, CatalogError>;
}

/// In-memory catalog backed by a plain entry list.
pub struct InMemoryCatalog {
    entries: Vec<MedicationReference>,
}

impl InMemoryCatalog {
    pub fn from_entries(entries: Vec<MedicationReference>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON array of entries.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(path.display().to_string(), e.to_string()))?;
        let entries: Vec<MedicationReference> = serde_json::from_str(&json)
            .map_err(|e| CatalogError::Parse(path.display().to_string(), e.to_string()))?;
        Ok(Self { entries })
    }

    /// Curated seed catalog covering the classes the rule tables reference.
    /// Illustrative domain data, not a validated clinical database.
    pub fn builtin() -> Self {
        fn entry(
            name: &str,
            generic: &str,
            brands: &str,
            class: &str,
            interactions: &str,
            contraindications: &str,
            indications: &str,
        ) -> MedicationReference {
            MedicationReference {
                name: name.into(),
                generic_name: generic.into(),
                brand_names: brands.into(),
                drug_class: class.into(),
                known_interactions: interactions.into(),
                contraindications: contraindications.into(),
                indications: indications.into(),
            }
        }

        Self::from_entries(vec![
            entry(
                "Lisinopril",
                "Lisinopril",
                "Zestril, Prinivil",
                "ACE Inhibitor",
                "Potassium supplements, NSAIDs, lithium",
                "Pregnancy, history of angioedema, bilateral renal artery stenosis",
                "Hypertension, heart failure",
            ),
            entry(
                "Potassium Chloride",
                "Potassium Chloride",
                "K-Dur, Klor-Con",
                "Potassium Supplement",
                "ACE inhibitors, potassium-sparing diuretics",
                "Hyperkalemia, severe renal impairment",
                "Hypokalemia",
            ),
            entry(
                "Warfarin",
                "Warfarin",
                "Coumadin, Jantoven",
                "Anticoagulant",
                "Aspirin, NSAIDs, many antibiotics",
                "Active bleeding, pregnancy",
                "Thromboembolism prophylaxis, atrial fibrillation",
            ),
            entry(
                "Aspirin",
                "Acetylsalicylic Acid",
                "Bayer, Ecotrin",
                "NSAID",
                "Warfarin, other NSAIDs, methotrexate",
                "Active peptic ulcer, bleeding disorders, children with viral illness",
                "Pain, fever, antiplatelet therapy",
            ),
            entry(
                "Ibuprofen",
                "Ibuprofen",
                "Advil, Motrin",
                "NSAID",
                "Warfarin, ACE inhibitors, lithium",
                "Active GI bleeding, severe renal impairment",
                "Pain, inflammation, fever",
            ),
            entry(
                "Metoprolol",
                "Metoprolol",
                "Lopressor, Toprol-XL",
                "Beta Blocker",
                "Calcium channel blockers, clonidine",
                "Severe bradycardia, heart block, decompensated heart failure",
                "Hypertension, angina, heart failure",
            ),
            entry(
                "Amlodipine",
                "Amlodipine",
                "Norvasc",
                "Calcium Channel Blocker",
                "Beta blockers, simvastatin",
                "Severe hypotension",
                "Hypertension, angina",
            ),
            entry(
                "Amoxicillin",
                "Amoxicillin",
                "Amoxil, Trimox",
                "Penicillin Antibiotic",
                "Warfarin, methotrexate",
                "Penicillin allergy",
                "Bacterial infections",
            ),
            entry(
                "Sulfamethoxazole/Trimethoprim",
                "Sulfamethoxazole-Trimethoprim",
                "Bactrim, Septra",
                "Sulfonamide Antibiotic",
                "Warfarin, methotrexate, ACE inhibitors",
                "Sulfa allergy, severe renal impairment",
                "Urinary tract infections, respiratory infections",
            ),
            entry(
                "Metformin",
                "Metformin",
                "Glucophage, Fortamet",
                "Biguanide",
                "Contrast media, alcohol",
                "Severe renal impairment, metabolic acidosis",
                "Type 2 diabetes",
            ),
            entry(
                "Atorvastatin",
                "Atorvastatin",
                "Lipitor",
                "Statin",
                "Gemfibrozil, clarithromycin, grapefruit juice",
                "Active liver disease, pregnancy",
                "Hyperlipidemia",
            ),
            entry(
                "Sertraline",
                "Sertraline",
                "Zoloft",
                "SSRI",
                "NSAIDs, warfarin, MAO inhibitors",
                "Concurrent MAO inhibitor use",
                "Depression, anxiety disorders",
            ),
            entry(
                "Furosemide",
                "Furosemide",
                "Lasix",
                "Loop Diuretic",
                "Lithium, aminoglycosides, NSAIDs",
                "Anuria",
                "Edema, heart failure, hypertension",
            ),
            entry(
                "Spironolactone",
                "Spironolactone",
                "Aldactone",
                "Potassium-Sparing Diuretic",
                "ACE inhibitors, potassium supplements",
                "Hyperkalemia, severe renal impairment",
                "Heart failure, resistant hypertension",
            ),
        ])
    }
}

impl MedicationCatalog for InMemoryCatalog {
    fn find(&self, query: &str) -> Result<Option<MedicationReference>, CatalogError> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(None);
        }

        let matched = self.entries.iter().find(|entry| {
            let name = entry.name.to_lowercase();
            let generic = entry.generic_name.to_lowercase();
            name.contains(&q)
                || q.contains(&name)
                || generic.contains(&q)
                || q.contains(&generic)
                || entry
                    .brand_names
                    .split(',')
                    .map(|b| b.trim().to_lowercase())
                    .any(|b| !b.is_empty() && (b.contains(&q) || q.contains(&b)))
        });

        Ok(matched.cloned())
    }
}
