use std::collections::HashSet;

use crate::models::{
    AllergyFinding, ContraindicationFinding, ContraindicationSeverity, DrugClassNote,
    EnrichedMedication, FindingSet, InteractionFinding, MonitoringItem, PatientContext, Severity,
};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

struct ClassInteraction {
    classes: (&'static str, &'static str),
    severity: Severity,
    description: &'static str,
    recommendation: &'static str,
    /// Monitoring parameter derived when this pair matches.
    monitoring: Option<(&'static str, &'static str, &'static str)>,
}

const CLASS_INTERACTIONS: &[ClassInteraction] = &[
    ClassInteraction {
        classes: ("ACE Inhibitor", "Potassium Supplement"),
        severity: Severity::Moderate,
        description: "Risk of hyperkalemia",
        recommendation: "Monitor potassium levels",
        monitoring: Some((
            "Serum potassium",
            "Within 1 week of starting, then periodically",
            "Combined potassium-raising therapy",
        )),
    },
    ClassInteraction {
        classes: ("ACE Inhibitor", "Potassium-Sparing Diuretic"),
        severity: Severity::Moderate,
        description: "Additive potassium retention with risk of hyperkalemia",
        recommendation: "Monitor potassium and renal function",
        monitoring: Some((
            "Serum potassium",
            "Within 1 week of starting, then periodically",
            "Combined potassium-raising therapy",
        )),
    },
    ClassInteraction {
        classes: ("Anticoagulant", "NSAID"),
        severity: Severity::Major,
        description: "Increased bleeding risk",
        recommendation: "Monitor INR closely, consider gastroprotection",
        monitoring: Some((
            "INR",
            "At least weekly during combined use",
            "Anticoagulant effect potentiated by NSAIDs",
        )),
    },
    ClassInteraction {
        classes: ("Beta Blocker", "Calcium Channel Blocker"),
        severity: Severity::Moderate,
        description: "Additive bradycardia and hypotension",
        recommendation: "Monitor heart rate and blood pressure",
        monitoring: Some((
            "Heart rate and blood pressure",
            "At each clinical contact",
            "Additive negative chronotropic effect",
        )),
    },
    ClassInteraction {
        classes: ("ACE Inhibitor", "NSAID"),
        severity: Severity::Moderate,
        description: "Blunted antihypertensive effect and risk of renal impairment",
        recommendation: "Monitor renal function and blood pressure",
        monitoring: Some((
            "Serum creatinine",
            "Within 2 weeks of starting the combination",
            "NSAID-related renal vasoconstriction",
        )),
    },
    ClassInteraction {
        classes: ("SSRI", "NSAID"),
        severity: Severity::Moderate,
        description: "Increased gastrointestinal bleeding risk",
        recommendation: "Consider gastroprotection, watch for GI bleeding signs",
        monitoring: None,
    },
    ClassInteraction {
        classes: ("Loop Diuretic", "NSAID"),
        severity: Severity::Moderate,
        description: "Blunted diuretic response and risk of renal impairment",
        recommendation: "Monitor weight, urine output and renal function",
        monitoring: None,
    },
];

struct AllergyFamily {
    /// Keyword searched in the patient's free-text allergy field.
    allergen: &'static str,
    /// Display name used in findings.
    display: &'static str,
    /// Name fragments that implicate a prescribed medication.
    members: &'static [&'static str],
    risk: &'static str,
}

const ALLERGY_FAMILIES: &[AllergyFamily] = &[
    AllergyFamily {
        allergen: "penicillin",
        display: "Penicillin",
        members: &["penicillin", "amoxicillin", "ampicillin", "augmentin"],
        risk: "Allergic reaction possible, including anaphylaxis",
    },
    AllergyFamily {
        allergen: "sulfa",
        display: "Sulfa",
        members: &["sulfa", "sulfamethoxazole", "sulfasalazine", "bactrim", "septra"],
        risk: "Allergic reaction possible",
    },
    AllergyFamily {
        allergen: "aspirin",
        display: "Aspirin",
        members: &["aspirin", "acetylsalicylic"],
        risk: "Hypersensitivity reaction possible",
    },
    AllergyFamily {
        allergen: "nsaid",
        display: "NSAID",
        members: &["ibuprofen", "naproxen", "diclofenac", "ketorolac", "aspirin"],
        risk: "Hypersensitivity reaction possible",
    },
    AllergyFamily {
        allergen: "codeine",
        display: "Codeine",
        members: &["codeine", "hydrocodone", "oxycodone"],
        risk: "Opioid hypersensitivity reaction possible",
    },
];

struct ConditionRule {
    drug_class: &'static str,
    /// Keyword searched in the patient's condition text.
    condition: &'static str,
    /// Display name of the triggering condition.
    display: &'static str,
    severity: ContraindicationSeverity,
    risk: &'static str,
    alternative: Option<&'static str>,
}

const CONDITION_RULES: &[ConditionRule] = &[
    ConditionRule {
        drug_class: "ACE Inhibitor",
        condition: "pregnan",
        display: "Pregnancy",
        severity: ContraindicationSeverity::Absolute,
        risk: "ACE inhibitors are fetotoxic in the second and third trimester",
        alternative: Some("Labetalol or methyldopa"),
    },
    ConditionRule {
        drug_class: "NSAID",
        condition: "peptic ulcer",
        display: "Peptic ulcer disease",
        severity: ContraindicationSeverity::Absolute,
        risk: "NSAIDs can precipitate ulcer bleeding and perforation",
        alternative: Some("Acetaminophen"),
    },
    ConditionRule {
        drug_class: "NSAID",
        condition: "kidney",
        display: "Renal impairment",
        severity: ContraindicationSeverity::Relative,
        risk: "NSAIDs can worsen renal function",
        alternative: Some("Acetaminophen"),
    },
    ConditionRule {
        drug_class: "Beta Blocker",
        condition: "asthma",
        display: "Asthma",
        severity: ContraindicationSeverity::Relative,
        risk: "Beta blockade can provoke bronchospasm",
        alternative: Some("Cardioselective agent or calcium channel blocker"),
    },
    ConditionRule {
        drug_class: "Biguanide",
        condition: "kidney",
        display: "Renal impairment",
        severity: ContraindicationSeverity::Relative,
        risk: "Metformin accumulation risks lactic acidosis",
        alternative: None,
    },
    ConditionRule {
        drug_class: "Statin",
        condition: "liver",
        display: "Active liver disease",
        severity: ContraindicationSeverity::Relative,
        risk: "Statins can aggravate hepatic injury",
        alternative: None,
    },
    ConditionRule {
        drug_class: "Anticoagulant",
        condition: "active bleeding",
        display: "Active bleeding",
        severity: ContraindicationSeverity::Absolute,
        risk: "Anticoagulation worsens ongoing hemorrhage",
        alternative: None,
    },
];

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Deterministic rule-based analysis. Always succeeds; given identical input
/// it produces identical output, list order included.
pub fn evaluate(enriched: &[EnrichedMedication], patient: &PatientContext) -> FindingSet {
    let (mut interactions, monitoring) = class_pair_interactions(enriched);
    interactions.extend(named_drug_interactions(enriched));

    FindingSet {
        interactions,
        allergies: allergy_conflicts(enriched, patient),
        contraindications: condition_contraindications(enriched, patient),
        condition_specific_concerns: vec![],
        vital_signs_considerations: vec![],
        monitoring,
        alternatives: vec![],
        drug_class_analysis: class_rollup(enriched),
    }
}

/// Match every unordered pair of resolved drug classes against the
/// interaction table. Each distinct class pair is reported at most once per
/// call, however many medications share the classes.
fn class_pair_interactions(
    enriched: &[EnrichedMedication],
) -> (Vec<InteractionFinding>, Vec<MonitoringItem>) {
    let mut findings = Vec::new();
    let mut monitoring: Vec<MonitoringItem> = Vec::new();
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();

    for i in 0..enriched.len() {
        for j in (i + 1)..enriched.len() {
            let (a, b) = (&enriched[i], &enriched[j]);
            if !a.has_known_class() || !b.has_known_class() {
                continue;
            }

            let mut key = [a.drug_class().to_string(), b.drug_class().to_string()];
            key.sort();
            let key = (key[0].clone(), key[1].clone());
            if seen_pairs.contains(&key) {
                continue;
            }

            let matched = CLASS_INTERACTIONS.iter().find(|rule| {
                (rule.classes.0 == a.drug_class() && rule.classes.1 == b.drug_class())
                    || (rule.classes.0 == b.drug_class() && rule.classes.1 == a.drug_class())
            });

            if let Some(rule) = matched {
                seen_pairs.insert(key);
                findings.push(InteractionFinding {
                    drugs: vec![a.prescribed.name.clone(), b.prescribed.name.clone()],
                    drug_classes: Some(vec![
                        a.drug_class().to_string(),
                        b.drug_class().to_string(),
                    ]),
                    severity: rule.severity,
                    description: rule.description.to_string(),
                    recommendation: rule.recommendation.to_string(),
                    clinical_relevance: None,
                });

                if let Some((parameter, frequency, reason)) = rule.monitoring {
                    if !monitoring.iter().any(|m| m.parameter == parameter) {
                        monitoring.push(MonitoringItem {
                            parameter: parameter.to_string(),
                            frequency: frequency.to_string(),
                            reason: reason.to_string(),
                        });
                    }
                }
            }
        }
    }

    (findings, monitoring)
}

/// Name-based warfarin rule, covering pairs the class table misses (e.g. when
/// one drug did not resolve to a catalog class).
fn named_drug_interactions(enriched: &[EnrichedMedication]) -> Vec<InteractionFinding> {
    let mut findings = Vec::new();

    for i in 0..enriched.len() {
        for j in (i + 1)..enriched.len() {
            let a = enriched[i].prescribed.name.to_lowercase();
            let b = enriched[j].prescribed.name.to_lowercase();

            let is_counterpart = |name: &str| name.contains("aspirin") || name.contains("ibuprofen");
            let hit = (a.contains("warfarin") && is_counterpart(&b))
                || (b.contains("warfarin") && is_counterpart(&a));

            if hit {
                findings.push(InteractionFinding {
                    drugs: vec![
                        enriched[i].prescribed.name.clone(),
                        enriched[j].prescribed.name.clone(),
                    ],
                    drug_classes: None,
                    severity: Severity::Major,
                    description: "Increased bleeding risk".to_string(),
                    recommendation: "Monitor INR closely, consider gastroprotection".to_string(),
                    clinical_relevance: None,
                });
            }
        }
    }

    findings
}

/// Scan every medication name against the allergen families present in the
/// patient's free-text allergy field. One finding per medication per family.
fn allergy_conflicts(
    enriched: &[EnrichedMedication],
    patient: &PatientContext,
) -> Vec<AllergyFinding> {
    let mut findings = Vec::new();
    let patient_allergies = patient.allergies.to_lowercase();

    for family in ALLERGY_FAMILIES {
        if !patient_allergies.contains(family.allergen) {
            continue;
        }

        for med in enriched {
            let name = med.prescribed.name.to_lowercase();
            if let Some(member) = family.members.iter().find(|m| name.contains(**m)) {
                let cross_reactivity = if *member != family.allergen {
                    Some(format!(
                        "{} is cross-reactive within the {} family",
                        member, family.display
                    ))
                } else {
                    None
                };
                findings.push(AllergyFinding {
                    drug: med.prescribed.name.clone(),
                    allergy: family.display.to_string(),
                    risk: family.risk.to_string(),
                    cross_reactivity,
                });
            }
        }
    }

    findings
}

/// Match (drug class, patient condition) pairs against the contraindication
/// table. Conditions are searched across medical conditions, diagnosis, and
/// current problems.
fn condition_contraindications(
    enriched: &[EnrichedMedication],
    patient: &PatientContext,
) -> Vec<ContraindicationFinding> {
    let mut findings = Vec::new();
    let condition_text = patient.condition_text();
    if condition_text.trim().is_empty() {
        return findings;
    }

    for rule in CONDITION_RULES {
        if !condition_text.contains(rule.condition) {
            continue;
        }

        for med in enriched {
            if med.drug_class() == rule.drug_class {
                findings.push(ContraindicationFinding {
                    drug: med.prescribed.name.clone(),
                    condition: rule.display.to_string(),
                    severity: rule.severity,
                    risk: rule.risk.to_string(),
                    alternative: rule.alternative.map(str::to_string),
                });
            }
        }
    }

    findings
}

/// One entry per distinct resolved class, in order of first appearance.
/// "Unknown"-class medications are excluded.
fn class_rollup(enriched: &[EnrichedMedication]) -> Vec<DrugClassNote> {
    let mut notes: Vec<DrugClassNote> = Vec::new();

    for med in enriched {
        if !med.has_known_class() {
            continue;
        }
        if notes.iter().any(|n| n.drug_class == med.drug_class()) {
            continue;
        }

        let medications: Vec<String> = enriched
            .iter()
            .filter(|m| m.drug_class() == med.drug_class())
            .map(|m| m.prescribed.name.clone())
            .collect();

        notes.push(DrugClassNote {
            drug_class: med.drug_class().to_string(),
            note: format!(
                "{} medication(s) in this class; monitor for additive class effects",
                medications.len()
            ),
            medications,
        });
    }

    notes
}
