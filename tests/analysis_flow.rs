//! End-to-end analysis flow: enrichment, remote pathway, fallback pathway,
//! and the canonical report contract.

use rxguard::catalog::InMemoryCatalog;
use rxguard::config::ModelConfig;
use rxguard::engine::{DrugInteractionAnalyzer, MockLlmClient};
use rxguard::models::{
    AnalysisRequest, AnalysisSource, PatientContext, PrescribedMedication, RiskLevel,
};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

fn med(name: &str, dosage: &str, frequency: &str) -> PrescribedMedication {
    PrescribedMedication {
        name: name.into(),
        dosage: dosage.into(),
        frequency: frequency.into(),
        duration: None,
    }
}

#[test]
fn fallback_end_to_end_produces_complete_report() {
    init_tracing();

    let analyzer = DrugInteractionAnalyzer::new(InMemoryCatalog::builtin(), None);
    let request = AnalysisRequest {
        medications: vec![
            med("Warfarin (5mg)", "5mg", "once daily"),
            med("Aspirin", "81mg", "once daily"),
            med("Amoxicillin", "500mg", "three times daily"),
        ],
        patient: PatientContext {
            age: "71".into(),
            gender: "M".into(),
            allergies: "Penicillin".into(),
            medical_conditions: "Atrial fibrillation".into(),
            ..Default::default()
        },
    };

    let report = analyzer.analyze(&request).unwrap();

    assert_eq!(report.analysis_metadata.analysis_source, AnalysisSource::Fallback);
    assert_eq!(report.analysis_metadata.medications_analyzed, 3);
    assert_eq!(report.overall_risk, RiskLevel::High);
    assert!(report.interactions.iter().any(|i| {
        i.drugs.iter().any(|d| d.contains("Warfarin")) && i.drugs.iter().any(|d| d.contains("Aspirin"))
    }));
    assert_eq!(report.allergies.len(), 1);
    assert_eq!(report.allergies[0].drug, "Amoxicillin");

    // Contract: the serialized report always carries every section.
    let json = serde_json::to_value(&report).unwrap();
    for key in [
        "interactions",
        "allergies",
        "contraindications",
        "condition_specific_concerns",
        "vital_signs_considerations",
        "monitoring",
        "alternatives",
        "drug_class_analysis",
    ] {
        assert!(json[key].is_array(), "{key} must always be a list");
    }
}

#[test]
fn remote_pathway_report_is_normalized() {
    init_tracing();

    let response = r#"The prescription looks risky. Here is my assessment:

```json
{
  "interactions": [],
  "allergies": [
    {"drug": "Amoxicillin", "allergy": "Penicillin", "risk": "Possible anaphylaxis"}
  ],
  "monitoring": [
    {"parameter": "Rash or breathing difficulty", "frequency": "First 48 hours", "reason": "Allergy history"}
  ],
  "overall_risk": "high",
  "summary": "ignore me"
}
```

Let me know if you need more detail."#;

    let analyzer = DrugInteractionAnalyzer::new(
        InMemoryCatalog::builtin(),
        Some(Box::new(MockLlmClient::new(response))),
    );
    let request = AnalysisRequest {
        medications: vec![med("Amoxicillin", "500mg", "three times daily")],
        patient: PatientContext {
            allergies: "Penicillin".into(),
            ..Default::default()
        },
    };

    let report = analyzer.analyze(&request).unwrap();

    assert_eq!(report.analysis_metadata.analysis_source, AnalysisSource::Ai);
    // One allergy finding, no interactions: the model's "high" is overridden.
    assert_eq!(report.overall_risk, RiskLevel::Moderate);
    assert_eq!(report.monitoring.len(), 1);
    assert!(report.summary.contains("1 allergy concern(s)"));
}

#[test]
fn unconfigured_engine_still_detects_known_interaction() {
    init_tracing();

    let analyzer =
        DrugInteractionAnalyzer::from_config(InMemoryCatalog::builtin(), &ModelConfig::default());
    let request = AnalysisRequest {
        medications: vec![
            med("Lisinopril", "10mg", "once daily"),
            med("Potassium Chloride", "20mEq", "once daily"),
        ],
        patient: PatientContext::default(),
    };

    let first = analyzer.analyze(&request).unwrap();
    let second = analyzer.analyze(&request).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.analysis_metadata.analysis_source, AnalysisSource::Fallback);
    assert!(first.overall_risk >= RiskLevel::Moderate);
    assert_eq!(first.interactions.len(), 1);
}
