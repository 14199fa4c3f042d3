//! Implements BookingPort using a JSON file.
//!
//! Appointments are kept in memory and rewritten in full on every save.

use crate::domain::{Appointment, DomainError};
use crate::ports::BookingPort;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookingFile {
    appointments: Vec<Appointment>,
}

/// JSON file-based appointment store.
pub struct BookingJson {
    path: PathBuf,
    cache: tokio::sync::RwLock<BookingFile>,
}

impl BookingJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(BookingFile::default()),
        }
    }

    /// Load existing appointments from disk. A missing file is an empty store;
    /// an unreadable one is reported rather than silently overwritten.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                DomainError::Repo(format!("parse {}: {}", self.path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BookingFile::default(),
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        info!(
            path = %self.path.display(),
            appointments = data.appointments.len(),
            "booking store loaded"
        );
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save using write-replace:
    /// 1. Write to temp file
    /// 2. sync_all() to flush to disk
    /// 3. Rename over the target path
    async fn save(&self, data: &BookingFile) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Booking(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Booking(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Booking(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Booking(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Booking(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Booking(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingPort for BookingJson {
    async fn save_appointment(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let mut cache = self.cache.write().await;
        cache.appointments.push(appointment.clone());
        if let Err(e) = self.save(&cache).await {
            // Keep memory and disk in agreement.
            cache.appointments.pop();
            warn!(path = %self.path.display(), error = %e, "appointment not saved");
            return Err(e);
        }
        Ok(())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.cache.read().await.appointments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Doctor, Symptom, SymptomSeverity, UrgencyLevel};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn appointment(time: &str) -> Appointment {
        Appointment {
            doctor: Doctor {
                id: "2".to_string(),
                name: "Dr. Michael Chen".to_string(),
                specialty: "Emergency Medicine".to_string(),
                rating: 4.9,
                distance: "1.2 mi".to_string(),
                address: "456 Care Ave, Downtown".to_string(),
                phone: "(555) 987-6543".to_string(),
                available_slots: vec![time.to_string()],
            },
            date: NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
            time: time.to_string(),
            notes: String::new(),
            symptoms: vec![Symptom::new("21", "Chest pain", SymptomSeverity::Severe)],
            top_condition: Some("Angina".to_string()),
            urgency: Some(UrgencyLevel::Urgent),
            booked_at: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("bookings.json");

        let store = BookingJson::new(&path);
        store.load().await.unwrap();
        for time in ["10:00 AM", "1:00 PM"] {
            store.save_appointment(&appointment(time)).await.unwrap();
        }
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = BookingJson::new(&path);
        reopened.load().await.unwrap();
        let saved = reopened.list_appointments().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], appointment("10:00 AM"));
        assert_eq!(saved[1].time, "1:00 PM");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = BookingJson::new(&path);
        assert!(matches!(store.load().await, Err(DomainError::Repo(_))));
    }
}
