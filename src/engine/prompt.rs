use crate::models::{EnrichedMedication, PatientContext};

/// JSON shape the model is instructed to return. Mirrors the canonical
/// report schema exactly; anything else is rejected by the parser.
const RESPONSE_SCHEMA: &str = r#"{
  "interactions": [
    {"drugs": ["drug1", "drug2"], "drug_classes": ["class1", "class2"], "severity": "major|moderate|minor", "description": "...", "recommendation": "...", "clinical_relevance": "optional note"}
  ],
  "allergies": [
    {"drug": "drug_name", "allergy": "allergy_type", "risk": "description", "cross_reactivity": "optional note"}
  ],
  "contraindications": [
    {"drug": "drug_name", "condition": "medical_condition", "severity": "absolute|relative", "risk": "description", "alternative": "optional suggestion"}
  ],
  "condition_specific_concerns": [
    {"drug": "drug_name", "condition": "condition", "concern": "...", "recommendation": "optional"}
  ],
  "vital_signs_considerations": [
    {"parameter": "e.g. blood pressure", "concern": "...", "recommendation": "optional"}
  ],
  "monitoring": [
    {"parameter": "what_to_monitor", "frequency": "how_often", "reason": "..."}
  ],
  "alternatives": [
    {"instead_of": "drug_name", "suggested": "alternative_drug", "reason": "..."}
  ],
  "drug_class_analysis": [
    {"drug_class": "class", "medications": ["drug1"], "note": "..."}
  ],
  "overall_risk": "low|moderate|high",
  "summary": "Brief overall assessment"
}"#;

/// Build the single natural-language prompt for the reasoning service.
pub fn build_analysis_prompt(enriched: &[EnrichedMedication], patient: &PatientContext) -> String {
    let mut medication_lines = String::new();
    for med in enriched {
        medication_lines.push_str(&format!(
            "- {} ({}, {}){}\n  Drug class: {}\n  Known interactions: {}\n  Contraindications: {}\n",
            med.prescribed.name,
            med.prescribed.dosage,
            med.prescribed.frequency,
            med.prescribed
                .duration
                .as_deref()
                .map(|d| format!(" for {d}"))
                .unwrap_or_default(),
            med.reference.drug_class,
            med.reference.known_interactions,
            med.reference.contraindications,
        ));
    }

    let or_default = |s: &str, fallback: &str| {
        if s.trim().is_empty() {
            fallback.to_string()
        } else {
            s.to_string()
        }
    };

    let mut clinical_context = String::new();
    if let Some(d) = patient.diagnosis.as_deref().filter(|d| !d.trim().is_empty()) {
        clinical_context.push_str(&format!("- Diagnosis: {d}\n"));
    }
    if let Some(p) = patient
        .current_problems
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        clinical_context.push_str(&format!("- Current problems: {p}\n"));
    }
    if let Some(v) = patient
        .vital_signs
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        clinical_context.push_str(&format!("- Vital signs: {v}\n"));
    }
    if let Some(n) = patient
        .general_notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
    {
        clinical_context.push_str(&format!("- Notes: {n}\n"));
    }

    format!(
        r#"Analyze drug interactions for the following prescription.

Patient Information:
- Age: {age}
- Gender: {gender}
- Allergies: {allergies}
- Medical Conditions: {conditions}
{clinical_context}
Medications:
{medication_lines}
Provide a comprehensive clinical safety analysis. Respond with ONLY one JSON object
matching this structure, with no prose before or after it:

{schema}

Omit optional fields rather than inventing content. Use empty arrays for sections
with no findings."#,
        schema = RESPONSE_SCHEMA,
        age = or_default(&patient.age, "Unknown"),
        gender = or_default(&patient.gender, "Unknown"),
        allergies = or_default(&patient.allergies, "None known"),
        conditions = or_default(&patient.medical_conditions, "None"),
    )
}
