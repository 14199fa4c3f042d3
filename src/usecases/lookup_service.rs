//! Reference-data search: symptom suggestions for the input step and the
//! disease lookup branch. Both are case-insensitive substring matches.

use crate::domain::{DiseaseInfo, DomainError, SelectedSymptomSet, Symptom};
use crate::ports::{DiseaseCatalogPort, SymptomCatalogPort};
use std::sync::Arc;
use tracing::debug;

pub struct LookupService {
    symptoms: Arc<dyn SymptomCatalogPort>,
    diseases: Arc<dyn DiseaseCatalogPort>,
    suggestion_limit: usize,
}

impl LookupService {
    pub fn new(
        symptoms: Arc<dyn SymptomCatalogPort>,
        diseases: Arc<dyn DiseaseCatalogPort>,
        suggestion_limit: usize,
    ) -> Self {
        Self {
            symptoms,
            diseases,
            suggestion_limit,
        }
    }

    /// Catalog symptoms whose name contains `query`, minus those already selected.
    pub async fn suggest_symptoms(
        &self,
        query: &str,
        selected: &SelectedSymptomSet,
    ) -> Result<Vec<Symptom>, DomainError> {
        let catalog = self.symptoms.list_symptoms().await?;
        let found = filter_symptoms(catalog, query, selected, self.suggestion_limit);
        debug!(query, suggestions = found.len(), "symptom search");
        Ok(found)
    }

    /// Diseases whose name or description contains `query`.
    pub async fn search_diseases(&self, query: &str) -> Result<Vec<DiseaseInfo>, DomainError> {
        let diseases = self.diseases.list_diseases().await?;
        let found: Vec<DiseaseInfo> = diseases
            .into_iter()
            .filter(|d| contains_ci(&d.name, query) || contains_ci(&d.description, query))
            .collect();
        debug!(query, matches = found.len(), "disease lookup");
        Ok(found)
    }
}

/// Catalog order is kept. A blank query matches nothing.
pub fn filter_symptoms(
    catalog: Vec<Symptom>,
    query: &str,
    selected: &SelectedSymptomSet,
    limit: usize,
) -> Vec<Symptom> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    catalog
        .into_iter()
        .filter(|s| contains_ci(&s.name, query) && !selected.contains(&s.id))
        .take(limit)
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::{RuleDiseaseCatalog, StaticSymptomCatalog};
    use crate::domain::SymptomSeverity;

    fn service(limit: usize) -> LookupService {
        LookupService::new(
            Arc::new(StaticSymptomCatalog::new()),
            Arc::new(RuleDiseaseCatalog::new()),
            limit,
        )
    }

    #[tokio::test]
    async fn test_suggestions_case_insensitive_and_exclude_selected() {
        let svc = service(10);
        let mut selected = SelectedSymptomSet::new();
        let names: Vec<String> = svc
            .suggest_symptoms("PAIN", &selected)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("Chest pain"));
        assert!(names.iter().all(|n| n.to_lowercase().contains("pain")));

        selected.add(Symptom::new("21", "Chest pain", SymptomSeverity::Severe));
        let after = svc.suggest_symptoms("chest", &selected).await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].name, "Chest tightness");
    }

    #[tokio::test]
    async fn test_suggestions_limit_and_blank_query() {
        let svc = service(2);
        let selected = SelectedSymptomSet::new();
        assert_eq!(svc.suggest_symptoms("e", &selected).await.unwrap().len(), 2);
        let blank = svc.suggest_symptoms("   ", &selected).await.unwrap();
        assert!(blank.is_empty());
    }

    #[tokio::test]
    async fn test_disease_search_matches_name_or_description() {
        let svc = service(10);
        let by_name = svc.search_diseases("diab").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Diabetes");

        let by_description = svc.search_diseases("appendix").await.unwrap();
        assert_eq!(by_description[0].name, "Appendicitis");

        assert!(svc.search_diseases("").await.unwrap().is_empty());
    }
}
