//! Reference-data adapters. Implement SymptomCatalogPort and DiseaseCatalogPort.
//!
//! Built-in symptom list, optional CSV replacement, and a disease list derived
//! from the rule table.

pub mod csv_loader;
pub mod diseases;
pub mod symptoms;

pub use csv_loader::{load_symptom_csv, parse_symptom_csv};
pub use diseases::RuleDiseaseCatalog;
pub use symptoms::StaticSymptomCatalog;
