//! The user's symptom selection: ordered, unique by id.

use super::entities::{Symptom, SymptomSeverity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of distinct symptoms. Insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedSymptomSet {
    symptoms: Vec<Symptom>,
}

impl SelectedSymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `symptom` unless its id is already present. Returns whether it was added.
    pub fn add(&mut self, symptom: Symptom) -> bool {
        if self.contains(&symptom.id) {
            return false;
        }
        self.symptoms.push(symptom);
        true
    }

    /// Removes the symptom with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s.id != id);
        self.symptoms.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.symptoms.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symptom> {
        self.symptoms.iter()
    }

    pub fn as_slice(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Lowercased symptom names, the form rule predicates are written against.
    pub fn lowercase_names(&self) -> HashSet<String> {
        self.symptoms
            .iter()
            .map(|s| s.name.to_lowercase())
            .collect()
    }

    pub fn has_severity_at_least(&self, threshold: SymptomSeverity) -> bool {
        self.symptoms.iter().any(|s| s.severity >= threshold)
    }
}

impl FromIterator<Symptom> for SelectedSymptomSet {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        let mut set = Self::new();
        for symptom in iter {
            set.add(symptom);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SelectedSymptomSet {
    type Item = &'a Symptom;
    type IntoIter = std::slice::Iter<'a, Symptom>;

    fn into_iter(self) -> Self::IntoIter {
        self.symptoms.iter()
    }
}
