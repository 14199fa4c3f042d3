//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod engine;
pub mod entities;
pub mod errors;
pub mod rules;
pub mod selection;
pub mod urgency;

pub use engine::{ConditionRuleEngine, MAX_RESULTS};
pub use entities::{
    AnalysisResult, Appointment, BookingData, Condition, ConditionSeverity, DiseaseInfo, Doctor,
    Step, Symptom, SymptomSeverity, Trigger, UrgencyLevel, UrgencyVerdict,
};
pub use errors::{DomainError, TransitionError};
pub use rules::{BodySystem, ConditionRule, ConditionTemplate, Predicate, default_rules};
pub use selection::SelectedSymptomSet;
pub use urgency::advise;
