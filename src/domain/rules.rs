//! Condition rule table. Rules are data: a predicate over the lowercased
//! symptom-name set plus the condition template it emits.
//!
//! Rules are grouped by body system but evaluated as one flat list, in the
//! order `default_rules` returns them. That order is the tie-break for equal
//! confidences, so do not reorder entries casually.

use super::entities::{Condition, ConditionSeverity};
use std::collections::HashSet;

/// Declarative match expression over lowercase symptom names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Has(&'static str),
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, names: &HashSet<String>) -> bool {
        match self {
            Predicate::Has(name) => names.contains(*name),
            Predicate::AnyOf(list) => list.iter().any(|n| names.contains(*n)),
            Predicate::AllOf(list) => list.iter().all(|n| names.contains(*n)),
            Predicate::And(parts) => parts.iter().all(|p| p.matches(names)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(names)),
        }
    }

    /// Every symptom name the expression refers to, first mention first.
    pub fn mentioned(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_mentioned(&mut out);
        out
    }

    fn collect_mentioned(&self, out: &mut Vec<&'static str>) {
        match self {
            Predicate::Has(name) => push_unique(out, *name),
            Predicate::AnyOf(list) | Predicate::AllOf(list) => {
                for name in list.iter() {
                    push_unique(out, *name);
                }
            }
            Predicate::And(parts) | Predicate::Or(parts) => {
                for p in parts {
                    p.collect_mentioned(out);
                }
            }
        }
    }
}

fn push_unique(out: &mut Vec<&'static str>, name: &'static str) {
    if !out.contains(&name) {
        out.push(name);
    }
}

/// Body system a rule belongs to. Grouping only; evaluation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodySystem {
    Respiratory,
    Cardiovascular,
    Gastrointestinal,
    Neurological,
    Infectious,
    Musculoskeletal,
    MentalHealth,
    Endocrine,
    Skin,
}

/// Condition emitted by a rule, before per-input adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionTemplate {
    pub name: &'static str,
    pub confidence: u8,
    pub severity: ConditionSeverity,
    /// Raise severity to `High` when the input contains a severe-class symptom.
    pub escalate_on_severe: bool,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

impl ConditionTemplate {
    pub fn instantiate(&self, has_severe_symptom: bool) -> Condition {
        let severity = if self.escalate_on_severe && has_severe_symptom {
            ConditionSeverity::High
        } else {
            self.severity
        };
        Condition {
            name: self.name.to_string(),
            confidence: self.confidence.min(100),
            severity,
            description: self.description.to_string(),
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRule {
    pub system: BodySystem,
    pub predicate: Predicate,
    pub template: ConditionTemplate,
}

impl ConditionRule {
    pub fn matches(&self, names: &HashSet<String>) -> bool {
        self.predicate.matches(names)
    }
}

const RESPIRATORY: &[&str] = &[
    "cough",
    "shortness of breath",
    "chest tightness",
    "wheezing",
];
const CARDIOVASCULAR: &[&str] = &[
    "chest pain",
    "heart palpitations",
    "shortness of breath",
    "swelling in legs",
];
const GASTROINTESTINAL: &[&str] = &["nausea", "vomiting", "diarrhea", "abdominal pain"];
const NEUROLOGICAL: &[&str] = &["headache", "dizziness", "confusion", "memory loss"];
const MUSCULOSKELETAL: &[&str] = &["joint pain", "muscle pain", "stiffness", "swollen joints"];
const MENTAL_HEALTH: &[&str] = &["anxiety", "depression", "panic attacks", "mood swings"];
const ENDOCRINE: &[&str] = &[
    "excessive thirst",
    "frequent urination",
    "weight loss",
    "fatigue",
];
const SKIN: &[&str] = &["rash", "itching", "skin discoloration"];

/// Body-system gate AND rule-specific predicate.
fn gated(
    system: BodySystem,
    gate: Predicate,
    specific: Predicate,
    template: ConditionTemplate,
) -> ConditionRule {
    ConditionRule {
        system,
        predicate: Predicate::And(vec![gate, specific]),
        template,
    }
}

fn template(
    name: &'static str,
    confidence: u8,
    severity: ConditionSeverity,
    description: &'static str,
    recommendations: &'static [&'static str],
) -> ConditionTemplate {
    ConditionTemplate {
        name,
        confidence,
        severity,
        escalate_on_severe: false,
        description,
        recommendations,
    }
}

/// The built-in rule table, in evaluation order.
pub fn default_rules() -> Vec<ConditionRule> {
    use BodySystem::*;
    use ConditionSeverity::{High, Low, Medium};
    use Predicate::{AllOf, AnyOf, Has, Or};

    vec![
        gated(
            Respiratory,
            AnyOf(RESPIRATORY),
            AnyOf(&["shortness of breath", "chest pain"]),
            template(
                "Asthma",
                75,
                Medium,
                "Chronic respiratory condition causing airway inflammation",
                &[
                    "Use prescribed inhaler",
                    "Avoid triggers",
                    "Seek immediate care if severe",
                ],
            ),
        ),
        gated(
            Respiratory,
            AnyOf(RESPIRATORY),
            AnyOf(&["fever", "cough"]),
            ConditionTemplate {
                escalate_on_severe: true,
                ..template(
                    "Pneumonia",
                    65,
                    Medium,
                    "Infection that inflames air sacs in lungs",
                    &[
                        "Seek medical attention",
                        "Rest and hydration",
                        "Complete prescribed antibiotics",
                    ],
                )
            },
        ),
        gated(
            Cardiovascular,
            AnyOf(CARDIOVASCULAR),
            Has("chest pain"),
            template(
                "Angina",
                70,
                High,
                "Chest pain due to reduced blood flow to heart",
                &[
                    "Seek immediate medical attention",
                    "Rest",
                    "Take prescribed nitroglycerin if available",
                ],
            ),
        ),
        gated(
            Cardiovascular,
            AnyOf(CARDIOVASCULAR),
            AnyOf(&["heart palpitations", "rapid heartbeat"]),
            template(
                "Arrhythmia",
                60,
                Medium,
                "Irregular heart rhythm",
                &["Monitor symptoms", "Avoid caffeine", "Consult cardiologist"],
            ),
        ),
        gated(
            Gastrointestinal,
            AnyOf(GASTROINTESTINAL),
            AllOf(&["diarrhea", "vomiting"]),
            template(
                "Gastroenteritis",
                80,
                Medium,
                "Inflammation of stomach and intestines",
                &[
                    "Stay hydrated",
                    "BRAT diet",
                    "Rest",
                    "Seek care if dehydration occurs",
                ],
            ),
        ),
        gated(
            Gastrointestinal,
            AnyOf(GASTROINTESTINAL),
            AllOf(&["abdominal pain", "nausea"]),
            template(
                "Appendicitis",
                55,
                High,
                "Inflammation of the appendix",
                &[
                    "Seek immediate medical attention",
                    "Do not eat or drink",
                    "Go to emergency room",
                ],
            ),
        ),
        gated(
            Neurological,
            AnyOf(NEUROLOGICAL),
            AllOf(&["headache", "fever"]),
            template(
                "Meningitis",
                45,
                High,
                "Inflammation of protective membranes covering brain and spinal cord",
                &[
                    "Seek immediate emergency care",
                    "Do not delay treatment",
                    "Call 112",
                ],
            ),
        ),
        gated(
            Neurological,
            AnyOf(NEUROLOGICAL),
            Or(vec![Has("migraine"), AllOf(&["headache", "nausea"])]),
            template(
                "Migraine",
                85,
                Medium,
                "Severe headache often with nausea and light sensitivity",
                &[
                    "Rest in dark room",
                    "Apply cold compress",
                    "Take prescribed medication",
                ],
            ),
        ),
        gated(
            Infectious,
            Has("fever"),
            AnyOf(&["cough", "sore throat", "runny nose"]),
            template(
                "Common Cold",
                90,
                Low,
                "Viral upper respiratory tract infection",
                &[
                    "Rest and hydration",
                    "Over-the-counter pain relievers",
                    "Monitor symptoms",
                ],
            ),
        ),
        gated(
            Infectious,
            Has("fever"),
            AnyOf(&["muscle pain", "fatigue", "chills"]),
            template(
                "Influenza",
                75,
                Medium,
                "Seasonal flu virus infection",
                &[
                    "Antiviral medication within 48 hours",
                    "Complete rest",
                    "Increase fluid intake",
                ],
            ),
        ),
        gated(
            Musculoskeletal,
            AnyOf(MUSCULOSKELETAL),
            AllOf(&["joint pain", "stiffness"]),
            template(
                "Arthritis",
                70,
                Medium,
                "Inflammation of joints causing pain and stiffness",
                &[
                    "Anti-inflammatory medication",
                    "Gentle exercise",
                    "Heat/cold therapy",
                ],
            ),
        ),
        gated(
            Musculoskeletal,
            AnyOf(MUSCULOSKELETAL),
            AllOf(&["muscle pain", "fatigue"]),
            template(
                "Fibromyalgia",
                55,
                Medium,
                "Chronic condition causing widespread muscle pain",
                &[
                    "Regular exercise",
                    "Stress management",
                    "Sleep hygiene",
                    "Pain management",
                ],
            ),
        ),
        gated(
            MentalHealth,
            AnyOf(MENTAL_HEALTH),
            AnyOf(&["anxiety", "panic attacks"]),
            template(
                "Anxiety Disorder",
                80,
                Medium,
                "Mental health condition characterized by excessive worry",
                &[
                    "Breathing exercises",
                    "Professional counseling",
                    "Stress reduction techniques",
                ],
            ),
        ),
        gated(
            MentalHealth,
            AnyOf(MENTAL_HEALTH),
            AnyOf(&["depression", "mood swings"]),
            template(
                "Depression",
                75,
                Medium,
                "Mental health disorder causing persistent sadness",
                &[
                    "Professional therapy",
                    "Support groups",
                    "Regular exercise",
                    "Medication if needed",
                ],
            ),
        ),
        gated(
            Endocrine,
            AnyOf(ENDOCRINE),
            AllOf(&["excessive thirst", "frequent urination"]),
            template(
                "Diabetes",
                70,
                Medium,
                "Condition affecting blood sugar regulation",
                &[
                    "Blood sugar testing",
                    "Dietary changes",
                    "Medical evaluation",
                    "Regular monitoring",
                ],
            ),
        ),
        gated(
            Skin,
            AnyOf(SKIN),
            AllOf(&["rash", "itching"]),
            template(
                "Eczema",
                65,
                Low,
                "Chronic skin condition causing inflammation and itching",
                &[
                    "Moisturize regularly",
                    "Avoid triggers",
                    "Topical treatments",
                    "Dermatologist consultation",
                ],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn rule(name: &str) -> ConditionRule {
        default_rules()
            .into_iter()
            .find(|r| r.template.name == name)
            .unwrap()
    }

    #[test]
    fn test_confidences_within_bounds() {
        for r in default_rules() {
            let t = &r.template;
            assert!(t.confidence <= 100, "{}", t.name);
            assert!(!t.recommendations.is_empty(), "{}", t.name);
        }
    }

    #[test]
    fn test_gate_is_required() {
        // Chest pain alone satisfies Asthma's specific clause but not the respiratory gate.
        assert!(!rule("Asthma").matches(&names(&["chest pain"])));
        assert!(rule("Asthma").matches(&names(&["wheezing", "chest pain"])));
    }

    #[test]
    fn test_migraine_either_branch() {
        let migraine = rule("Migraine");
        assert!(migraine.matches(&names(&["headache", "nausea"])));
        // "migraine" alone is outside the neurological gate.
        assert!(!migraine.matches(&names(&["migraine"])));
        assert!(migraine.matches(&names(&["dizziness", "migraine"])));
        assert!(!migraine.matches(&names(&["headache"])));
    }

    #[test]
    fn test_pneumonia_escalates_on_severe() {
        let pneumonia = rule("Pneumonia").template;
        let calm = pneumonia.instantiate(false).severity;
        let escalated = pneumonia.instantiate(true).severity;
        assert_eq!(calm, ConditionSeverity::Medium);
        assert_eq!(escalated, ConditionSeverity::High);
        // Non-escalating templates ignore the flag.
        let eczema = rule("Eczema").template;
        assert_eq!(eczema.instantiate(true).severity, ConditionSeverity::Low);
    }

    #[test]
    fn test_mentioned_symptoms_unique_in_order() {
        let mentioned = rule("Migraine").predicate.mentioned();
        let expected = [
            "headache",
            "dizziness",
            "confusion",
            "memory loss",
            "migraine",
            "nausea",
        ];
        assert_eq!(mentioned, expected);
    }
}
