//! Disease reference list derived from the condition rule table.

use crate::domain::{ConditionRule, DiseaseInfo, DomainError, default_rules};
use crate::ports::DiseaseCatalogPort;

pub struct RuleDiseaseCatalog {
    diseases: Vec<DiseaseInfo>,
}

impl RuleDiseaseCatalog {
    /// Built from the default rule table.
    pub fn new() -> Self {
        Self::from_rules(&default_rules())
    }

    /// One entry per distinct condition name, in table order.
    pub fn from_rules(rules: &[ConditionRule]) -> Self {
        let mut diseases: Vec<DiseaseInfo> = Vec::new();
        for rule in rules {
            let t = &rule.template;
            if diseases.iter().any(|d| d.name == t.name) {
                continue;
            }
            diseases.push(DiseaseInfo {
                name: t.name.to_string(),
                description: t.description.to_string(),
                severity: t.severity,
                recommendations: t.recommendations.iter().map(|r| r.to_string()).collect(),
                related_symptoms: rule
                    .predicate
                    .mentioned()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }
        Self { diseases }
    }
}

impl Default for RuleDiseaseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DiseaseCatalogPort for RuleDiseaseCatalog {
    async fn list_diseases(&self) -> Result<Vec<DiseaseInfo>, DomainError> {
        Ok(self.diseases.clone())
    }
}
