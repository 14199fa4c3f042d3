//! Domain entities. Pure data structures for the core business.
//!
//! No catalog/IO types here; adapters map their records into these.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A patient-reported complaint from the symptom catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub severity: SymptomSeverity,
}

impl Symptom {
    pub fn new(id: impl Into<String>, name: impl Into<String>, severity: SymptomSeverity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            severity,
        }
    }
}

/// Fixed severity class of a catalog symptom. Ordered mild < moderate < severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
    Severe,
}

impl SymptomSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            SymptomSeverity::Mild => "mild",
            SymptomSeverity::Moderate => "moderate",
            SymptomSeverity::Severe => "severe",
        }
    }

    /// Parses the lowercase catalog spelling. Surrounding whitespace and case are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "mild" => Some(SymptomSeverity::Mild),
            "moderate" => Some(SymptomSeverity::Moderate),
            "severe" => Some(SymptomSeverity::Severe),
            _ => None,
        }
    }
}

impl fmt::Display for SymptomSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk severity of a candidate condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConditionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConditionSeverity::Low => "low",
            ConditionSeverity::Medium => "medium",
            ConditionSeverity::High => "high",
        })
    }
}

/// A candidate diagnosis produced by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    /// Authored weight in `0..=100`.
    pub confidence: u8,
    pub severity: ConditionSeverity,
    pub description: String,
    pub recommendations: Vec<String>,
}

/// Ranked engine output: at most three conditions, confidence non-increasing.
///
/// Only the engine builds non-empty values; everyone else reads. Not
/// deserializable, so a value can never come from outside the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Vec<Condition>);

impl AnalysisResult {
    pub(crate) fn from_ranked(conditions: Vec<Condition>) -> Self {
        Self(conditions)
    }

    /// At most `max_len` entries, every confidence within `0..=100`, ranked
    /// by non-increasing confidence.
    pub(crate) fn is_well_formed(&self, max_len: usize) -> bool {
        self.0.len() <= max_len
            && self.0.iter().all(|c| c.confidence <= 100)
            && self.0.windows(2).all(|w| w[0].confidence >= w[1].confidence)
    }

    /// Highest-confidence condition, if analysis has run.
    pub fn top(&self) -> Option<&Condition> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Condition] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Urgent,
    Moderate,
    Routine,
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UrgencyLevel::Urgent => "urgent",
            UrgencyLevel::Moderate => "moderate",
            UrgencyLevel::Routine => "routine",
        })
    }
}

/// Triage recommendation derived from an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyVerdict {
    pub level: UrgencyLevel,
    pub message: String,
}

/// Healthcare provider record from the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub distance: String,
    pub address: String,
    pub phone: String,
    pub available_slots: Vec<String>,
}

/// Booking form fields. Only meaningful while the session is in `Step::Booking`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingData {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: String,
}

impl BookingData {
    /// Date and a non-blank time are both set.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.time.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// A confirmed appointment handed to the booking store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub doctor: Doctor,
    pub date: NaiveDate,
    pub time: String,
    pub notes: String,
    pub symptoms: Vec<Symptom>,
    pub top_condition: Option<String>,
    pub urgency: Option<UrgencyLevel>,
    pub booked_at: DateTime<Utc>,
}

/// Disease reference entry shown in the lookup branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    pub name: String,
    pub description: String,
    pub severity: ConditionSeverity,
    pub recommendations: Vec<String>,
    /// Symptom names (lowercase) the matching rule refers to.
    pub related_symptoms: Vec<String>,
}

/// Wizard step of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Input,
    Analyzing,
    Results,
    Doctors,
    Booking,
    DiseaseLookup,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Input => "input",
            Step::Analyzing => "analyzing",
            Step::Results => "results",
            Step::Doctors => "doctors",
            Step::Booking => "booking",
            Step::DiseaseLookup => "disease_lookup",
        })
    }
}

/// Event that may move a session from one step to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    RequestAnalysis,
    AnalysisCompleted,
    RequestProviders,
    NewAnalysis,
    PickProvider,
    Back,
    ConfirmBooking,
    OpenDiseaseLookup,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trigger::RequestAnalysis => "request_analysis",
            Trigger::AnalysisCompleted => "analysis_completed",
            Trigger::RequestProviders => "request_providers",
            Trigger::NewAnalysis => "new_analysis",
            Trigger::PickProvider => "pick_provider",
            Trigger::Back => "back",
            Trigger::ConfirmBooking => "confirm_booking",
            Trigger::OpenDiseaseLookup => "open_disease_lookup",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_severity_parse() {
        assert_eq!(
            SymptomSeverity::parse(" Severe "),
            Some(SymptomSeverity::Severe)
        );
        assert_eq!(SymptomSeverity::parse("mild"), Some(SymptomSeverity::Mild));
        assert_eq!(SymptomSeverity::parse("critical"), None);
        assert!(SymptomSeverity::Moderate > SymptomSeverity::Mild);
    }

    #[test]
    fn test_booking_data_completeness() {
        let mut data = BookingData::default();
        assert!(!data.is_complete());
        data.date = NaiveDate::from_ymd_opt(2026, 11, 2);
        assert!(!data.is_complete());
        data.time = Some("   ".to_string());
        assert!(!data.is_complete());
        data.time = Some("9:00 AM".to_string());
        assert!(data.is_complete());
    }
}
