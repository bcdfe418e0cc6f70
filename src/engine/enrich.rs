use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::MedicationCatalog;
use crate::models::{EnrichedMedication, MedicationReference, PrescribedMedication};

/// Trailing strength/parenthetical suffix, e.g. "Lisinopril (10mg)".
static STRENGTH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

/// Strip a trailing parenthetical from a prescribed name to get the catalog
/// lookup key.
pub fn lookup_key(name: &str) -> String {
    STRENGTH_SUFFIX.replace(name, "").trim().to_string()
}

/// Join each prescribed line item with its best-matching catalog entry.
///
/// Every input produces exactly one output. A missing catalog match or a
/// per-item lookup error degrades that item to an "Unknown"-class placeholder
/// without aborting the rest of the batch.
pub fn enrich(
    catalog: &dyn MedicationCatalog,
    prescribed: &[PrescribedMedication],
) -> Vec<EnrichedMedication> {
    prescribed
        .iter()
        .map(|med| {
            let key = lookup_key(&med.name);
            let reference = match catalog.find(&key) {
                Ok(Some(reference)) => reference,
                Ok(None) => MedicationReference::unknown(&key),
                Err(e) => {
                    tracing::warn!(
                        medication = %med.name,
                        error = %e,
                        "Catalog lookup failed, treating medication as unknown"
                    );
                    MedicationReference::unknown(&key)
                }
            };
            EnrichedMedication {
                prescribed: med.clone(),
                reference,
            }
        })
        .collect()
}

/// Count of distinct resolved drug classes, excluding "Unknown".
pub fn distinct_class_count(enriched: &[EnrichedMedication]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for med in enriched {
        if med.has_known_class() && !seen.contains(&med.drug_class()) {
            seen.push(med.drug_class());
        }
    }
    seen.len()
}
