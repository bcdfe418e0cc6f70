use std::time::Instant;

use super::client::{LlmClient, OpenRouterClient};
use super::enrich::{distinct_class_count, enrich};
use super::normalize::normalize;
use super::parser::parse_analysis_response;
use super::prompt::build_analysis_prompt;
use super::rules;
use super::EngineError;
use crate::catalog::MedicationCatalog;
use crate::config::ModelConfig;
use crate::models::{
    AnalysisReport, AnalysisRequest, AnalysisSource, EnrichedMedication, FindingSet,
    PatientContext,
};

/// Drug interaction analysis engine.
///
/// One synchronous call per prescription: enrich against the catalog, prefer
/// the external reasoning service, and degrade to the deterministic rule
/// engine on any remote failure. Holds no mutable state between calls;
/// concurrent analyses need no locking.
pub struct DrugInteractionAnalyzer<C: MedicationCatalog> {
    catalog: C,
    client: Option<Box<dyn LlmClient>>,
}

impl<C: MedicationCatalog> DrugInteractionAnalyzer<C> {
    /// Build with an explicit client (or none, forcing fallback-only mode).
    pub fn new(catalog: C, client: Option<Box<dyn LlmClient>>) -> Self {
        Self { catalog, client }
    }

    /// Build from configuration. A missing credential is not an error for
    /// the caller: the analyzer comes up in fallback-only mode with a single
    /// warning to the operator.
    pub fn from_config(catalog: C, config: &ModelConfig) -> Self {
        let client: Option<Box<dyn LlmClient>> = match OpenRouterClient::from_config(config) {
            Ok(client) => Some(Box::new(client)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Reasoning service unavailable, all analyses will use rule-based fallback"
                );
                None
            }
        };
        Self::new(catalog, client)
    }

    /// Analyze one prescription. Total for any well-formed input: remote
    /// failures never surface, only `InvalidInput` (a caller bug) does.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, EngineError> {
        validate(request)?;
        let start = Instant::now();

        let enriched = enrich(&self.catalog, &request.medications);
        let medications_analyzed = enriched.len();
        let drug_classes_identified = distinct_class_count(&enriched);

        let (findings, source) = match self.remote_findings(&enriched, &request.patient) {
            Some(findings) => (findings, AnalysisSource::Ai),
            None => (
                rules::evaluate(&enriched, &request.patient),
                AnalysisSource::Fallback,
            ),
        };

        let report = normalize(findings, source, medications_analyzed, drug_classes_identified);

        tracing::info!(
            source = report.analysis_metadata.analysis_source.as_str(),
            medications = medications_analyzed,
            drug_classes = drug_classes_identified,
            interactions = report.interactions.len(),
            allergies = report.allergies.len(),
            risk = report.overall_risk.as_str(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Prescription analysis complete"
        );

        Ok(report)
    }

    /// Attempt the external reasoning path. Any failure is logged and
    /// converted to `None`; the caller then runs the rule engine.
    fn remote_findings(
        &self,
        enriched: &[EnrichedMedication],
        patient: &PatientContext,
    ) -> Option<FindingSet> {
        let client = self.client.as_ref()?;
        let prompt = build_analysis_prompt(enriched, patient);

        let outcome = client
            .complete(&prompt)
            .and_then(|text| parse_analysis_response(&text));

        match outcome {
            Ok(findings) => Some(findings),
            Err(e) => {
                tracing::warn!(error = %e, "AI analysis unavailable, using rule-based fallback");
                None
            }
        }
    }
}

/// Reject caller bugs early instead of silently analyzing nothing useful.
fn validate(request: &AnalysisRequest) -> Result<(), EngineError> {
    for (index, med) in request.medications.iter().enumerate() {
        if med.name.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "medication at index {index} has a blank name"
            )));
        }
    }
    Ok(())
}
