//! Booking use case: provider listing and appointment confirmation.
//!
//! The appointment is persisted before the session is reset, so a failed
//! save leaves the user on the booking step with their input intact.

use crate::domain::{Appointment, Doctor, DomainError};
use crate::ports::{BookingPort, ProviderDirectoryPort};
use crate::usecases::session::SessionStateMachine;
use std::sync::Arc;
use tracing::info;

pub struct BookingService {
    providers: Arc<dyn ProviderDirectoryPort>,
    bookings: Arc<dyn BookingPort>,
}

impl BookingService {
    pub fn new(providers: Arc<dyn ProviderDirectoryPort>, bookings: Arc<dyn BookingPort>) -> Self {
        Self {
            providers,
            bookings,
        }
    }

    pub async fn providers(&self) -> Result<Vec<Doctor>, DomainError> {
        self.providers.list_providers().await
    }

    /// Validate, persist, then confirm (`Booking -> Input` with a full reset).
    pub async fn confirm(
        &self,
        session: &mut SessionStateMachine,
    ) -> Result<Appointment, DomainError> {
        let appointment = session.prepare_booking()?;
        self.bookings.save_appointment(&appointment).await?;
        session.confirm_booking()?;
        info!(
            doctor = %appointment.doctor.name,
            date = %appointment.date,
            time = %appointment.time,
            "appointment booked"
        );
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::directory::StaticProviderDirectory;
    use crate::domain::{ConditionRuleEngine, Step, Symptom, SymptomSeverity, TransitionError};
    use chrono::NaiveDate;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryBookings {
        saved: Mutex<Vec<Appointment>>,
    }

    #[async_trait::async_trait]
    impl BookingPort for MemoryBookings {
        async fn save_appointment(&self, appointment: &Appointment) -> Result<(), DomainError> {
            self.saved.lock().await.push(appointment.clone());
            Ok(())
        }

        async fn list_appointments(&self) -> Result<Vec<Appointment>, DomainError> {
            Ok(self.saved.lock().await.clone())
        }
    }

    struct FailingBookings;

    #[async_trait::async_trait]
    impl BookingPort for FailingBookings {
        async fn save_appointment(&self, _appointment: &Appointment) -> Result<(), DomainError> {
            Err(DomainError::Booking("disk full".into()))
        }

        async fn list_appointments(&self) -> Result<Vec<Appointment>, DomainError> {
            Ok(Vec::new())
        }
    }

    async fn session_in_booking(svc: &BookingService) -> SessionStateMachine {
        let mut session = SessionStateMachine::new(
            Arc::new(ConditionRuleEngine::default()),
            Duration::from_millis(1),
        );
        session.add_symptom(Symptom::new("50", "Fever", SymptomSeverity::Moderate));
        session.add_symptom(Symptom::new("11", "Cough", SymptomSeverity::Mild));
        session.request_analysis().unwrap();
        session.wait_for_analysis().await;
        session.request_providers().unwrap();
        let doctor = svc.providers().await.unwrap().remove(0);
        session.select_doctor(doctor).unwrap();
        session
    }

    #[tokio::test]
    async fn test_confirm_persists_then_resets() {
        let store = Arc::new(MemoryBookings::default());
        let svc = BookingService::new(Arc::new(StaticProviderDirectory::new()), store.clone());
        let mut session = session_in_booking(&svc).await;
        session
            .set_booking_date(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap())
            .unwrap();
        session.set_booking_time("11:30 AM").unwrap();

        let appointment = svc.confirm(&mut session).await.unwrap();
        assert_eq!(appointment.top_condition.as_deref(), Some("Common Cold"));
        assert_eq!(session.step(), Step::Input);
        assert!(session.symptoms().is_empty());

        let saved = store.list_appointments().await.unwrap();
        assert_eq!(saved, vec![appointment]);
    }

    #[tokio::test]
    async fn test_incomplete_booking_is_not_saved() {
        let store = Arc::new(MemoryBookings::default());
        let svc = BookingService::new(Arc::new(StaticProviderDirectory::new()), store.clone());
        let mut session = session_in_booking(&svc).await;

        let err = svc.confirm(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Transition(TransitionError::IncompleteBooking)
        ));
        assert!(store.list_appointments().await.unwrap().is_empty());
        assert_eq!(session.step(), Step::Booking);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_booking_step() {
        let svc = BookingService::new(
            Arc::new(StaticProviderDirectory::new()),
            Arc::new(FailingBookings),
        );
        let mut session = session_in_booking(&svc).await;
        session
            .set_booking_date(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap())
            .unwrap();
        session.set_booking_time("2:00 PM").unwrap();

        assert!(svc.confirm(&mut session).await.is_err());
        assert_eq!(session.step(), Step::Booking);
        assert_eq!(session.booking().time.as_deref(), Some("2:00 PM"));
    }
}
