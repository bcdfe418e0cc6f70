use serde::{Deserialize, Deserializer, Serialize};

/// Read-only snapshot of the patient at analysis time. Supplied entirely by
/// the calling workflow; the engine never mutates or re-fetches it.
///
/// Free-text fields arrive as the clinician typed them ("None known",
/// "Penicillin, sulfa drugs", ...). Empty strings are valid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientContext {
    /// Accepted as either a JSON string or number on the wire.
    #[serde(deserialize_with = "string_or_number", default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub medical_conditions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_problems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vital_signs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_notes: Option<String>,
}

impl PatientContext {
    /// Concatenated lowercase view of all condition-bearing fields, used by
    /// the contraindication rules.
    pub fn condition_text(&self) -> String {
        let mut parts = vec![self.medical_conditions.as_str()];
        if let Some(d) = &self.diagnosis {
            parts.push(d);
        }
        if let Some(p) = &self.current_problems {
            parts.push(p);
        }
        parts.join(" ").to_lowercase()
    }
}

/// Deserialize a field that callers send as either `"42"` or `42`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Str(String),
        Int(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_accepts_string_or_number() {
        let from_str: PatientContext =
            serde_json::from_str(r#"{"age": "42", "gender": "F"}"#).unwrap();
        assert_eq!(from_str.age, "42");

        let from_num: PatientContext =
            serde_json::from_str(r#"{"age": 42, "gender": "F"}"#).unwrap();
        assert_eq!(from_num.age, "42");
    }

    #[test]
    fn condition_text_merges_all_sources() {
        let patient = PatientContext {
            medical_conditions: "Hypertension".into(),
            diagnosis: Some("Chronic Kidney Disease".into()),
            current_problems: Some("Ankle swelling".into()),
            ..Default::default()
        };
        let text = patient.condition_text();
        assert!(text.contains("hypertension"));
        assert!(text.contains("kidney disease"));
        assert!(text.contains("ankle swelling"));
    }

    #[test]
    fn all_fields_optional_on_the_wire() {
        let patient: PatientContext = serde_json::from_str("{}").unwrap();
        assert!(patient.age.is_empty());
        assert!(patient.allergies.is_empty());
        assert!(patient.vital_signs.is_none());
    }
}
