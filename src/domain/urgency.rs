//! Urgency advisor: triage label from the top condition and raw symptom severity.

use super::entities::{
    AnalysisResult, ConditionSeverity, SymptomSeverity, UrgencyLevel, UrgencyVerdict,
};
use super::selection::SelectedSymptomSet;

pub const URGENT_MESSAGE: &str = "Seek immediate medical attention";
pub const MODERATE_MESSAGE: &str = "Schedule appointment within 24-48 hours";
pub const ROUTINE_MESSAGE: &str = "Consider routine consultation if symptoms persist";

/// Derive the triage verdict. First match wins:
/// 1. any severe symptom, or top condition `High` -> urgent
/// 2. top condition `Medium` -> moderate
/// 3. otherwise -> routine
///
/// An empty `results` (analysis not run yet) is treated as having no top condition.
pub fn advise(symptoms: &SelectedSymptomSet, results: &AnalysisResult) -> UrgencyVerdict {
    let top_severity = results.top().map(|c| c.severity);
    let any_severe = symptoms.has_severity_at_least(SymptomSeverity::Severe);

    let (level, message) = if any_severe || top_severity == Some(ConditionSeverity::High) {
        (UrgencyLevel::Urgent, URGENT_MESSAGE)
    } else if top_severity == Some(ConditionSeverity::Medium) {
        (UrgencyLevel::Moderate, MODERATE_MESSAGE)
    } else {
        (UrgencyLevel::Routine, ROUTINE_MESSAGE)
    };

    UrgencyVerdict {
        level,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engine::ConditionRuleEngine;
    use crate::domain::entities::Symptom;

    fn set(items: &[(&str, &str, SymptomSeverity)]) -> SelectedSymptomSet {
        items
            .iter()
            .map(|(id, name, sev)| Symptom::new(*id, *name, *sev))
            .collect()
    }

    fn level_for(symptoms: &SelectedSymptomSet) -> UrgencyLevel {
        let results = ConditionRuleEngine::default().evaluate(symptoms);
        advise(symptoms, &results).level
    }

    #[test]
    fn test_chest_pain_is_urgent() {
        let verdict = {
            let s = set(&[("21", "Chest pain", SymptomSeverity::Severe)]);
            let r = ConditionRuleEngine::default().evaluate(&s);
            advise(&s, &r)
        };
        assert_eq!(verdict.level, UrgencyLevel::Urgent);
        assert_eq!(verdict.message, URGENT_MESSAGE);
    }

    #[test]
    fn test_common_cold_is_routine() {
        let s = set(&[
            ("50", "Fever", SymptomSeverity::Moderate),
            ("11", "Cough", SymptomSeverity::Mild),
        ]);
        assert_eq!(level_for(&s), UrgencyLevel::Routine);
    }

    #[test]
    fn test_diabetes_is_moderate() {
        let s = set(&[
            ("89", "Excessive thirst", SymptomSeverity::Moderate),
            ("68", "Frequent urination", SymptomSeverity::Moderate),
        ]);
        let results = ConditionRuleEngine::default().evaluate(&s);
        let verdict = advise(&s, &results);
        assert_eq!(verdict.level, UrgencyLevel::Moderate);
        assert_eq!(verdict.message, MODERATE_MESSAGE);
    }

    #[test]
    fn test_dry_skin_is_routine() {
        let s = set(&[("62", "Dry skin", SymptomSeverity::Mild)]);
        assert_eq!(level_for(&s), UrgencyLevel::Routine);
    }

    #[test]
    fn test_severe_symptom_overrides_low_top_condition() {
        // Top condition is Common Cold (low) but a severe symptom is present.
        let s = set(&[
            ("50", "Fever", SymptomSeverity::Moderate),
            ("16", "Sore throat", SymptomSeverity::Mild),
            ("37", "Blood in stool", SymptomSeverity::Severe),
        ]);
        let results = ConditionRuleEngine::default().evaluate(&s);
        assert_eq!(
            results.top().map(|c| c.severity),
            Some(ConditionSeverity::Low)
        );
        assert_eq!(advise(&s, &results).level, UrgencyLevel::Urgent);
    }

    #[test]
    fn test_empty_results_without_severe_is_routine() {
        let s = set(&[("1", "Headache", SymptomSeverity::Mild)]);
        assert_eq!(
            advise(&s, &AnalysisResult::default()).level,
            UrgencyLevel::Routine
        );
    }
}
