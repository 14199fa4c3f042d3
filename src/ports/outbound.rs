//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Appointment, DiseaseInfo, Doctor, DomainError, Symptom};

/// Read-only symptom reference list.
#[async_trait::async_trait]
pub trait SymptomCatalogPort: Send + Sync {
    /// All known symptoms in catalog order.
    async fn list_symptoms(&self) -> Result<Vec<Symptom>, DomainError>;
}

/// Read-only disease reference list for the lookup branch.
#[async_trait::async_trait]
pub trait DiseaseCatalogPort: Send + Sync {
    async fn list_diseases(&self) -> Result<Vec<DiseaseInfo>, DomainError>;
}

/// Healthcare provider directory. Identity and availability are its concern, not the core's.
#[async_trait::async_trait]
pub trait ProviderDirectoryPort: Send + Sync {
    async fn list_providers(&self) -> Result<Vec<Doctor>, DomainError>;
}

/// Booking store. Receives confirmed appointments.
#[async_trait::async_trait]
pub trait BookingPort: Send + Sync {
    /// Persist a confirmed appointment.
    ///
    /// # Errors
    /// Returns `DomainError::Booking` if the record could not be stored.
    async fn save_appointment(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// All stored appointments, oldest first.
    async fn list_appointments(&self) -> Result<Vec<Appointment>, DomainError>;
}
