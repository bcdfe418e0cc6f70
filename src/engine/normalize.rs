use crate::models::{
    AnalysisMetadata, AnalysisReport, AnalysisSource, ContraindicationSeverity, FindingSet,
    RiskLevel, Severity,
};

/// Assemble the canonical report from either pathway's findings.
///
/// Risk and summary are always computed here; a risk level asserted by the
/// model is never trusted as-is. Both pathways therefore share one
/// aggregation rule.
pub fn normalize(
    findings: FindingSet,
    source: AnalysisSource,
    medications_analyzed: usize,
    drug_classes_identified: usize,
) -> AnalysisReport {
    let overall_risk = aggregate_risk(&findings);
    let summary = build_summary(&findings, source, drug_classes_identified);

    AnalysisReport {
        interactions: findings.interactions,
        allergies: findings.allergies,
        contraindications: findings.contraindications,
        condition_specific_concerns: findings.condition_specific_concerns,
        vital_signs_considerations: findings.vital_signs_considerations,
        monitoring: findings.monitoring,
        alternatives: findings.alternatives,
        drug_class_analysis: findings.drug_class_analysis,
        overall_risk,
        summary,
        analysis_metadata: AnalysisMetadata {
            analysis_source: source,
            medications_analyzed,
            drug_classes_identified,
        },
    }
}

/// `high` on any major interaction or absolute contraindication, `moderate`
/// on any interaction or allergy finding, else `low`.
fn aggregate_risk(findings: &FindingSet) -> RiskLevel {
    let has_major_interaction = findings
        .interactions
        .iter()
        .any(|i| i.severity == Severity::Major);
    let has_absolute_contraindication = findings
        .contraindications
        .iter()
        .any(|c| c.severity == ContraindicationSeverity::Absolute);

    if has_major_interaction || has_absolute_contraindication {
        RiskLevel::High
    } else if !findings.interactions.is_empty() || !findings.allergies.is_empty() {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

fn build_summary(
    findings: &FindingSet,
    source: AnalysisSource,
    drug_classes_identified: usize,
) -> String {
    let interactions = findings.interactions.len();
    let allergies = findings.allergies.len();

    match source {
        AnalysisSource::Ai => format!(
            "Analysis identified {interactions} potential drug interaction(s) and {allergies} allergy concern(s)."
        ),
        AnalysisSource::Fallback => format!(
            "Rule-based analysis identified {interactions} potential drug interaction(s) and {allergies} allergy concern(s) across {drug_classes_identified} drug class(es)."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllergyFinding, ContraindicationFinding, InteractionFinding};

    fn interaction(severity: Severity) -> InteractionFinding {
        InteractionFinding {
            drugs: vec!["A".into(), "B".into()],
            drug_classes: None,
            severity,
            description: "d".into(),
            recommendation: "r".into(),
            clinical_relevance: None,
        }
    }

    fn allergy() -> AllergyFinding {
        AllergyFinding {
            drug: "Amoxicillin".into(),
            allergy: "Penicillin".into(),
            risk: "Allergic reaction possible".into(),
            cross_reactivity: None,
        }
    }

    fn contraindication(severity: ContraindicationSeverity) -> ContraindicationFinding {
        ContraindicationFinding {
            drug: "Lisinopril".into(),
            condition: "Pregnancy".into(),
            severity,
            risk: "r".into(),
            alternative: None,
        }
    }

    #[test]
    fn empty_findings_are_low_risk() {
        let report = normalize(FindingSet::default(), AnalysisSource::Fallback, 0, 0);
        assert_eq!(report.overall_risk, RiskLevel::Low);
        assert!(report.interactions.is_empty());
        assert!(report.monitoring.is_empty());
    }

    #[test]
    fn moderate_interaction_is_moderate_risk() {
        let findings = FindingSet {
            interactions: vec![interaction(Severity::Moderate)],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Fallback, 2, 2);
        assert_eq!(report.overall_risk, RiskLevel::Moderate);
    }

    #[test]
    fn allergy_alone_is_moderate_risk() {
        let findings = FindingSet {
            allergies: vec![allergy()],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Ai, 1, 1);
        assert_eq!(report.overall_risk, RiskLevel::Moderate);
    }

    #[test]
    fn major_interaction_raises_risk_to_high() {
        // Monotonicity: adding a major interaction to an otherwise empty set
        // always lands on high.
        let empty = normalize(FindingSet::default(), AnalysisSource::Fallback, 0, 0);
        assert_eq!(empty.overall_risk, RiskLevel::Low);

        let findings = FindingSet {
            interactions: vec![interaction(Severity::Major)],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Fallback, 2, 2);
        assert!(report.overall_risk > empty.overall_risk);
        assert_eq!(report.overall_risk, RiskLevel::High);
    }

    #[test]
    fn absolute_contraindication_is_high_risk() {
        let findings = FindingSet {
            contraindications: vec![contraindication(ContraindicationSeverity::Absolute)],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Ai, 1, 1);
        assert_eq!(report.overall_risk, RiskLevel::High);
    }

    #[test]
    fn relative_contraindication_alone_stays_low() {
        let findings = FindingSet {
            contraindications: vec![contraindication(ContraindicationSeverity::Relative)],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Ai, 1, 1);
        assert_eq!(report.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn fallback_summary_reports_class_count() {
        let findings = FindingSet {
            interactions: vec![interaction(Severity::Moderate)],
            allergies: vec![allergy()],
            ..Default::default()
        };
        let report = normalize(findings, AnalysisSource::Fallback, 3, 2);
        assert_eq!(
            report.summary,
            "Rule-based analysis identified 1 potential drug interaction(s) and 1 allergy concern(s) across 2 drug class(es)."
        );
    }

    #[test]
    fn ai_summary_omits_class_count() {
        let report = normalize(FindingSet::default(), AnalysisSource::Ai, 2, 2);
        assert!(!report.summary.contains("drug class"));
        assert!(report.summary.contains("0 potential drug interaction(s)"));
    }

    #[test]
    fn metadata_stamped_with_source_and_counts() {
        let report = normalize(FindingSet::default(), AnalysisSource::Ai, 4, 3);
        assert_eq!(report.analysis_metadata.analysis_source, AnalysisSource::Ai);
        assert_eq!(report.analysis_metadata.medications_analyzed, 4);
        assert_eq!(report.analysis_metadata.drug_classes_identified, 3);
    }
}
