use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity enums
// ---------------------------------------------------------------------------

/// Qualitative interaction strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Clinically significant, action required.
    Major,
    /// Monitor.
    Moderate,
    /// Low concern.
    Minor,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

/// Whether a drug must not (`absolute`) or generally should not (`relative`)
/// be used under the triggering condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContraindicationSeverity {
    Absolute,
    Relative,
}

impl ContraindicationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }
}

/// Aggregated risk classification, always recomputed centrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Which pathway produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Ai,
    Fallback,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Fallback => "fallback",
        }
    }
}

// ---------------------------------------------------------------------------
// Finding types
// ---------------------------------------------------------------------------

/// One detected drug-drug interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionFinding {
    /// Concrete drug names involved, as prescribed.
    pub drugs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_classes: Option<Vec<String>>,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_relevance: Option<String>,
}

/// One prescribed drug conflicting with a recorded patient allergy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllergyFinding {
    pub drug: String,
    /// The matched allergy type, e.g. "Penicillin".
    pub allergy: String,
    pub risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_reactivity: Option<String>,
}

/// One drug contraindicated by a patient condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContraindicationFinding {
    pub drug: String,
    pub condition: String,
    pub severity: ContraindicationSeverity,
    pub risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

/// Condition-specific caution that falls short of a contraindication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionConcern {
    pub drug: String,
    pub condition: String,
    pub concern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Concern tied to a recorded vital sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSignConcern {
    pub parameter: String,
    pub concern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// One parameter to monitor while the prescription is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringItem {
    pub parameter: String,
    pub frequency: String,
    pub reason: String,
}

/// Suggested substitution for a problematic drug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSuggestion {
    pub instead_of: String,
    pub suggested: String,
    pub reason: String,
}

/// Per-class roll-up of the medications in the prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugClassNote {
    pub drug_class: String,
    pub medications: Vec<String>,
    pub note: String,
}

// ---------------------------------------------------------------------------
// FindingSet — pathway-neutral intermediate
// ---------------------------------------------------------------------------

/// Everything either pathway detected, before risk aggregation. Both the
/// parsed model response and the rule engine produce one of these; the
/// normalizer turns it into the canonical [`AnalysisReport`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingSet {
    pub interactions: Vec<InteractionFinding>,
    pub allergies: Vec<AllergyFinding>,
    pub contraindications: Vec<ContraindicationFinding>,
    pub condition_specific_concerns: Vec<ConditionConcern>,
    pub vital_signs_considerations: Vec<VitalSignConcern>,
    pub monitoring: Vec<MonitoringItem>,
    pub alternatives: Vec<AlternativeSuggestion>,
    pub drug_class_analysis: Vec<DrugClassNote>,
}

// ---------------------------------------------------------------------------
// AnalysisReport — canonical output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_source: AnalysisSource,
    pub medications_analyzed: usize,
    pub drug_classes_identified: usize,
}

/// The canonical analysis result, produced exactly once per invocation.
/// Every list field is always present (empty rather than absent) and
/// `overall_risk` / `summary` are derived, never caller-settable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub interactions: Vec<InteractionFinding>,
    pub allergies: Vec<AllergyFinding>,
    pub contraindications: Vec<ContraindicationFinding>,
    pub condition_specific_concerns: Vec<ConditionConcern>,
    pub vital_signs_considerations: Vec<VitalSignConcern>,
    pub monitoring: Vec<MonitoringItem>,
    pub alternatives: Vec<AlternativeSuggestion>,
    pub drug_class_analysis: Vec<DrugClassNote>,
    pub overall_risk: RiskLevel,
    pub summary: String,
    pub analysis_metadata: AnalysisMetadata,
}
