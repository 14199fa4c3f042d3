//! Load a replacement symptom catalog from CSV. Uses the `csv` crate.
//!
//! Format: header `id,name,severity`, one symptom per row, severity one of
//! `mild`, `moderate`, `severe`.

use super::symptoms::StaticSymptomCatalog;
use crate::domain::{DomainError, Symptom, SymptomSeverity};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SymptomRow {
    id: String,
    name: String,
    severity: String,
}

/// Parse catalog rows. Rejects unknown severities, blank names and duplicate ids.
pub fn parse_symptom_csv<R: std::io::Read>(reader: R) -> Result<Vec<Symptom>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut symptoms = Vec::new();

    for (idx, row) in rdr.deserialize::<SymptomRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let err = |msg: String| DomainError::Catalog(format!("line {}: {}", line, msg));
        let row = row.map_err(|e| err(e.to_string()))?;

        let Some(severity) = SymptomSeverity::parse(&row.severity) else {
            return Err(err(format!("unknown severity '{}'", row.severity)));
        };
        if row.name.is_empty() {
            return Err(err("empty name".to_string()));
        }
        if !seen.insert(row.id.clone()) {
            return Err(err(format!("duplicate id '{}'", row.id)));
        }
        symptoms.push(Symptom::new(row.id, row.name, severity));
    }

    Ok(symptoms)
}

/// Read and parse a catalog file.
pub async fn load_symptom_csv(path: &Path) -> Result<StaticSymptomCatalog, DomainError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::Catalog(format!("read {}: {}", path.display(), e)))?;
    let symptoms = parse_symptom_csv(bytes.as_slice())?;
    info!(path = %path.display(), count = symptoms.len(), "symptom catalog loaded");
    Ok(StaticSymptomCatalog::from_symptoms(symptoms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_catalog() {
        let data = "id,name,severity\n1, Headache ,mild\n2,Chest pain,SEVERE\n";
        let symptoms = parse_symptom_csv(data.as_bytes()).unwrap();
        assert_eq!(
            symptoms,
            vec![
                Symptom::new("1", "Headache", SymptomSeverity::Mild),
                Symptom::new("2", "Chest pain", SymptomSeverity::Severe),
            ]
        );
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let data = "id,name,severity\n1,Headache,terrible\n";
        let err = parse_symptom_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("terrible"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let data = "id,name,severity\n1,Headache,mild\n1,Fever,moderate\n";
        let err = parse_symptom_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate id '1'"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symptoms.csv");
        tokio::fs::write(&path, "id,name,severity\n7,Dry skin,mild\n")
            .await
            .unwrap();

        let catalog = load_symptom_csv(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("7").map(|s| s.name.as_str()), Some("Dry skin"));

        let missing = dir.path().join("missing.csv");
        assert!(load_symptom_csv(&missing).await.is_err());
    }
}
