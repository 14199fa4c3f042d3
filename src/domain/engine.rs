//! Condition rule engine. Evaluates the rule table against a symptom selection.
//!
//! Pure and deterministic: same selection + same table = same ranked output,
//! including the order of equal-confidence entries.

use super::entities::{AnalysisResult, Condition, ConditionSeverity, SymptomSeverity};
use super::rules::{ConditionRule, default_rules};
use super::selection::SelectedSymptomSet;
use tracing::debug;

/// Upper bound on the number of ranked conditions returned.
pub const MAX_RESULTS: usize = 3;

const FALLBACK_NAME: &str = "General Malaise";
const FALLBACK_CONFIDENCE: u8 = 60;
const FALLBACK_DESCRIPTION: &str = "General feeling of discomfort or illness";
const FALLBACK_RECOMMENDATIONS: &[&str] = &[
    "Rest and hydration",
    "Monitor symptoms",
    "Consult healthcare provider if symptoms persist",
];

/// Rule engine over an ordered, immutable rule table.
#[derive(Debug, Clone)]
pub struct ConditionRuleEngine {
    rules: Vec<ConditionRule>,
}

impl ConditionRuleEngine {
    pub fn new(rules: Vec<ConditionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ConditionRule] {
        &self.rules
    }

    /// Rank candidate conditions for `symptoms`.
    ///
    /// Every satisfied rule contributes one condition (same-name conditions
    /// from different rules are kept side by side). An empty working list is
    /// replaced by the "General Malaise" fallback, so the result is never empty.
    /// The list is then stably sorted by confidence, descending, and cut to
    /// [`MAX_RESULTS`].
    pub fn evaluate(&self, symptoms: &SelectedSymptomSet) -> AnalysisResult {
        let names = symptoms.lowercase_names();
        let has_severe = symptoms.has_severity_at_least(SymptomSeverity::Severe);

        let mut conditions: Vec<Condition> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(&names))
            .map(|rule| rule.template.instantiate(has_severe))
            .collect();

        if conditions.is_empty() {
            conditions.push(fallback(symptoms));
        }

        // Vec::sort_by is stable: equal confidences keep rule-table order.
        conditions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        conditions.truncate(MAX_RESULTS);

        debug!(
            symptoms = symptoms.len(),
            results = conditions.len(),
            top = %conditions[0].name,
            "rule evaluation complete"
        );

        AnalysisResult::from_ranked(conditions)
    }
}

impl Default for ConditionRuleEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

fn fallback(symptoms: &SelectedSymptomSet) -> Condition {
    let severity = if symptoms.has_severity_at_least(SymptomSeverity::Moderate) {
        ConditionSeverity::Medium
    } else {
        ConditionSeverity::Low
    };
    Condition {
        name: FALLBACK_NAME.to_string(),
        confidence: FALLBACK_CONFIDENCE,
        severity,
        description: FALLBACK_DESCRIPTION.to_string(),
        recommendations: FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
