//! Built-in symptom catalog. Static reference data, read-only.

use crate::domain::{DomainError, Symptom, SymptomSeverity};
use crate::ports::SymptomCatalogPort;

/// `(id, name, severity)` rows, grouped by body system.
const BUILTIN_SYMPTOMS: &[(&str, &str, SymptomSeverity)] = {
    use SymptomSeverity::{Mild, Moderate, Severe};
    &[
        // Neurological
        ("1", "Headache", Mild),
        ("2", "Migraine", Moderate),
        ("3", "Dizziness", Moderate),
        ("4", "Memory loss", Moderate),
        ("5", "Confusion", Moderate),
        ("6", "Seizures", Severe),
        ("7", "Numbness in limbs", Moderate),
        ("8", "Tremors", Moderate),
        ("9", "Loss of coordination", Severe),
        ("10", "Blurred vision", Moderate),
        // Respiratory
        ("11", "Cough", Mild),
        ("12", "Shortness of breath", Severe),
        ("13", "Wheezing", Moderate),
        ("14", "Chest tightness", Moderate),
        ("15", "Coughing up blood", Severe),
        ("16", "Sore throat", Mild),
        ("17", "Runny nose", Mild),
        ("18", "Sneezing", Mild),
        ("19", "Hoarse voice", Mild),
        ("20", "Difficulty swallowing", Moderate),
        // Cardiovascular
        ("21", "Chest pain", Severe),
        ("22", "Heart palpitations", Moderate),
        ("23", "Rapid heartbeat", Moderate),
        ("24", "Irregular heartbeat", Moderate),
        ("25", "Swelling in legs", Moderate),
        ("26", "High blood pressure", Moderate),
        ("27", "Low blood pressure", Moderate),
        ("28", "Cold hands and feet", Mild),
        // Gastrointestinal
        ("29", "Nausea", Moderate),
        ("30", "Vomiting", Moderate),
        ("31", "Diarrhea", Moderate),
        ("32", "Constipation", Mild),
        ("33", "Abdominal pain", Moderate),
        ("34", "Bloating", Mild),
        ("35", "Loss of appetite", Moderate),
        ("36", "Heartburn", Mild),
        ("37", "Blood in stool", Severe),
        ("38", "Black stool", Severe),
        ("39", "Excessive gas", Mild),
        ("40", "Acid reflux", Mild),
        // Musculoskeletal
        ("41", "Joint pain", Moderate),
        ("42", "Muscle pain", Mild),
        ("43", "Back pain", Moderate),
        ("44", "Neck pain", Moderate),
        ("45", "Stiffness", Mild),
        ("46", "Swollen joints", Moderate),
        ("47", "Muscle weakness", Moderate),
        ("48", "Muscle cramps", Mild),
        ("49", "Bone pain", Moderate),
        // General / constitutional
        ("50", "Fever", Moderate),
        ("51", "Chills", Moderate),
        ("52", "Fatigue", Mild),
        ("53", "Weakness", Moderate),
        ("54", "Weight loss", Moderate),
        ("55", "Weight gain", Moderate),
        ("56", "Night sweats", Moderate),
        ("57", "Excessive sweating", Mild),
        ("58", "Sleep problems", Mild),
        ("59", "Loss of consciousness", Severe),
        // Skin
        ("60", "Rash", Mild),
        ("61", "Itching", Mild),
        ("62", "Dry skin", Mild),
        ("63", "Skin discoloration", Moderate),
        ("64", "Bruising", Moderate),
        ("65", "Unusual moles", Moderate),
        ("66", "Hair loss", Mild),
        ("67", "Nail changes", Mild),
        // Urinary / reproductive
        ("68", "Frequent urination", Moderate),
        ("69", "Painful urination", Moderate),
        ("70", "Blood in urine", Severe),
        ("71", "Difficulty urinating", Moderate),
        ("72", "Pelvic pain", Moderate),
        ("73", "Irregular periods", Moderate),
        ("74", "Heavy menstrual bleeding", Moderate),
        // Mental health
        ("75", "Anxiety", Moderate),
        ("76", "Depression", Moderate),
        ("77", "Mood swings", Mild),
        ("78", "Irritability", Mild),
        ("79", "Panic attacks", Moderate),
        ("80", "Difficulty concentrating", Mild),
        // Eye, ear, nose, throat
        ("81", "Eye pain", Moderate),
        ("82", "Red eyes", Mild),
        ("83", "Ear pain", Moderate),
        ("84", "Hearing loss", Moderate),
        ("85", "Ringing in ears", Mild),
        ("86", "Nasal congestion", Mild),
        ("87", "Loss of smell", Moderate),
        ("88", "Loss of taste", Moderate),
        // Endocrine
        ("89", "Excessive thirst", Moderate),
        ("90", "Excessive hunger", Moderate),
        ("91", "Heat intolerance", Mild),
        ("92", "Cold intolerance", Mild),
        ("93", "Changes in appetite", Mild),
    ]
};

/// Symptom catalog backed by an in-memory list (built-in or loaded from CSV).
#[derive(Debug, Clone)]
pub struct StaticSymptomCatalog {
    symptoms: Vec<Symptom>,
}

impl StaticSymptomCatalog {
    /// The built-in catalog.
    pub fn new() -> Self {
        Self {
            symptoms: BUILTIN_SYMPTOMS
                .iter()
                .map(|(id, name, severity)| Symptom::new(*id, *name, *severity))
                .collect(),
        }
    }

    pub fn from_symptoms(symptoms: Vec<Symptom>) -> Self {
        Self { symptoms }
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }
}

impl Default for StaticSymptomCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SymptomCatalogPort for StaticSymptomCatalog {
    async fn list_symptoms(&self) -> Result<Vec<Symptom>, DomainError> {
        Ok(self.symptoms.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_ids_unique() {
        let catalog = StaticSymptomCatalog::new();
        assert_eq!(catalog.len(), 93);
        let ids: HashSet<&str> = catalog.symptoms.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_builtin_severities() {
        let catalog = StaticSymptomCatalog::new();
        let severity = |id| catalog.get(id).map(|s| s.severity);
        assert_eq!(severity("21"), Some(SymptomSeverity::Severe));
        assert_eq!(catalog.get("50").map(|s| s.name.as_str()), Some("Fever"));
        assert_eq!(severity("62"), Some(SymptomSeverity::Mild));
        assert!(catalog.get("94").is_none());
    }
}
