//! Session state machine: owns the wizard step, the symptom selection, the
//! in-flight analysis job and the booking slots.
//!
//! Transitions follow `next_step`. A refused transition returns
//! `TransitionError` and leaves the session exactly as it was. Starting an
//! analysis and every reset bump the generation; analysis completions tagged
//! with an older generation are dropped.

use crate::domain::{
    AnalysisResult, Appointment, BookingData, ConditionRuleEngine, Doctor, MAX_RESULTS,
    SelectedSymptomSet, Step, Symptom, TransitionError, Trigger, UrgencyVerdict, advise,
};
use crate::usecases::analysis_job::{AnalysisCompletion, AnalysisJob};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Complete mutable state of one user's interaction with the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub step: Step,
    pub symptoms: SelectedSymptomSet,
    pub results: AnalysisResult,
    pub selected_doctor: Option<Doctor>,
    pub booking: BookingData,
}

/// The transition table. `None` means the trigger is illegal from `from`.
pub fn next_step(from: Step, trigger: Trigger) -> Option<Step> {
    use Step::*;
    use Trigger::*;

    match (from, trigger) {
        (Input, RequestAnalysis) => Some(Analyzing),
        (Input, OpenDiseaseLookup) => Some(DiseaseLookup),
        (Analyzing, AnalysisCompleted) => Some(Results),
        (Results, RequestProviders) => Some(Doctors),
        (Results, NewAnalysis) => Some(Input),
        (Doctors, PickProvider) => Some(Booking),
        (Doctors, Back) => Some(Results),
        (Booking, ConfirmBooking) => Some(Input),
        (Booking, Back) => Some(Doctors),
        (DiseaseLookup, Back) => Some(Input),
        _ => None,
    }
}

pub struct SessionStateMachine {
    session: Session,
    generation: u64,
    job: Option<AnalysisJob>,
    engine: Arc<ConditionRuleEngine>,
    analysis_delay: Duration,
}

impl SessionStateMachine {
    pub fn new(engine: Arc<ConditionRuleEngine>, analysis_delay: Duration) -> Self {
        Self {
            session: Session::default(),
            generation: 0,
            job: None,
            engine,
            analysis_delay,
        }
    }

    pub fn step(&self) -> Step {
        self.session.step
    }

    /// Read-only projection for the presentation layer.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn symptoms(&self) -> &SelectedSymptomSet {
        &self.session.symptoms
    }

    pub fn results(&self) -> &AnalysisResult {
        &self.session.results
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.session.selected_doctor.as_ref()
    }

    pub fn booking(&self) -> &BookingData {
        &self.session.booking
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_analysis(&self) -> bool {
        self.job.is_some()
    }

    /// Triage verdict for the current results. `None` until an analysis has completed.
    pub fn urgency(&self) -> Option<UrgencyVerdict> {
        if self.session.results.is_empty() {
            return None;
        }
        Some(advise(&self.session.symptoms, &self.session.results))
    }

    /// Add a symptom while in `Input`. Elsewhere, or for a duplicate id, a no-op.
    pub fn add_symptom(&mut self, symptom: Symptom) -> bool {
        if self.session.step != Step::Input {
            debug!(step = %self.session.step, id = %symptom.id, "selection locked; add ignored");
            return false;
        }
        self.session.symptoms.add(symptom)
    }

    /// Remove a symptom while in `Input`. Elsewhere, or for an absent id, a no-op.
    pub fn remove_symptom(&mut self, id: &str) -> bool {
        if self.session.step != Step::Input {
            debug!(step = %self.session.step, id, "selection locked; remove ignored");
            return false;
        }
        self.session.symptoms.remove(id)
    }

    /// `Input -> Analyzing`. Spawns the analysis job on the current tokio runtime
    /// and returns the generation it is tagged with.
    pub fn request_analysis(&mut self) -> Result<u64, TransitionError> {
        let to = self.check(Trigger::RequestAnalysis)?;
        if self.session.symptoms.is_empty() {
            return Err(TransitionError::EmptySelection);
        }

        self.generation += 1;
        let job = AnalysisJob::spawn(
            self.generation,
            Arc::clone(&self.engine),
            self.session.symptoms.clone(),
            self.analysis_delay,
        );
        self.job = Some(job);
        self.enter(to, Trigger::RequestAnalysis);
        Ok(self.generation)
    }

    /// `Analyzing -> Results`, if `completion` belongs to the current generation.
    ///
    /// Returns `false` and changes nothing for a stale or malformed completion.
    pub(crate) fn apply_completion(&mut self, completion: AnalysisCompletion) -> bool {
        if completion.generation != self.generation || self.session.step != Step::Analyzing {
            debug!(
                job_generation = completion.generation,
                generation = self.generation,
                step = %self.session.step,
                "discarding stale analysis completion"
            );
            return false;
        }
        if !completion.results.is_well_formed(MAX_RESULTS) {
            warn!(
                generation = self.generation,
                results = completion.results.len(),
                "discarding malformed analysis completion"
            );
            return false;
        }

        self.job = None;
        let top = completion.results.top().map(|c| c.name.as_str());
        info!(
            generation = self.generation,
            results = completion.results.len(),
            top = top.unwrap_or("-"),
            "analysis complete"
        );
        self.session.results = completion.results;
        self.enter(Step::Results, Trigger::AnalysisCompleted);
        true
    }

    /// Await the pending job, if any, and apply its completion.
    ///
    /// If the task died without a result the engine is run inline, so the
    /// session never stays stuck in `Analyzing`.
    pub async fn wait_for_analysis(&mut self) -> bool {
        let Some(job) = self.job.take() else {
            return false;
        };
        let generation = job.generation();
        let completion = match job.join().await {
            Some(completion) => completion,
            None => {
                warn!(generation, "analysis job died; evaluating inline");
                AnalysisCompletion {
                    generation,
                    results: self.engine.evaluate(&self.session.symptoms),
                }
            }
        };
        self.apply_completion(completion)
    }

    /// `Results -> Doctors`.
    pub fn request_providers(&mut self) -> Result<(), TransitionError> {
        let to = self.check(Trigger::RequestProviders)?;
        self.enter(to, Trigger::RequestProviders);
        Ok(())
    }

    /// `Results -> Input`, clearing the selection and results.
    pub fn new_analysis(&mut self) -> Result<(), TransitionError> {
        self.check(Trigger::NewAnalysis)?;
        self.reset();
        info!(generation = self.generation, "new analysis started");
        Ok(())
    }

    /// `Doctors -> Booking`, remembering the chosen provider.
    pub fn select_doctor(&mut self, doctor: Doctor) -> Result<(), TransitionError> {
        let to = self.check(Trigger::PickProvider)?;
        debug!(doctor_id = %doctor.id, "provider selected");
        self.session.selected_doctor = Some(doctor);
        self.enter(to, Trigger::PickProvider);
        Ok(())
    }

    /// `Doctors -> Results`, `Booking -> Doctors` or `DiseaseLookup -> Input`.
    pub fn back(&mut self) -> Result<Step, TransitionError> {
        let to = self.check(Trigger::Back)?;
        self.enter(to, Trigger::Back);
        Ok(to)
    }

    /// `Input -> DiseaseLookup`.
    pub fn open_disease_lookup(&mut self) -> Result<(), TransitionError> {
        let to = self.check(Trigger::OpenDiseaseLookup)?;
        self.enter(to, Trigger::OpenDiseaseLookup);
        Ok(())
    }

    pub fn set_booking_date(&mut self, date: NaiveDate) -> Result<(), TransitionError> {
        self.booking_mut()?.date = Some(date);
        Ok(())
    }

    pub fn set_booking_time(&mut self, time: impl Into<String>) -> Result<(), TransitionError> {
        self.booking_mut()?.time = Some(time.into());
        Ok(())
    }

    pub fn set_booking_notes(&mut self, notes: impl Into<String>) -> Result<(), TransitionError> {
        self.booking_mut()?.notes = notes.into();
        Ok(())
    }

    /// Validate the booking and build the appointment record without changing state.
    pub fn prepare_booking(&self) -> Result<Appointment, TransitionError> {
        self.check(Trigger::ConfirmBooking)?;
        let doctor = self
            .session
            .selected_doctor
            .clone()
            .ok_or(TransitionError::NoProviderSelected)?;
        let booking = &self.session.booking;
        let (Some(date), Some(time)) = (booking.date, booking.time.clone()) else {
            return Err(TransitionError::IncompleteBooking);
        };
        if !booking.is_complete() {
            return Err(TransitionError::IncompleteBooking);
        }

        Ok(Appointment {
            doctor,
            date,
            time,
            notes: booking.notes.clone(),
            symptoms: self.session.symptoms.as_slice().to_vec(),
            top_condition: self.session.results.top().map(|c| c.name.clone()),
            urgency: self.urgency().map(|v| v.level),
            booked_at: Utc::now(),
        })
    }

    /// `Booking -> Input`. Returns the confirmed appointment and resets the session.
    pub fn confirm_booking(&mut self) -> Result<Appointment, TransitionError> {
        let appointment = self.prepare_booking()?;
        self.reset();
        info!(
            generation = self.generation,
            doctor_id = %appointment.doctor.id,
            date = %appointment.date,
            time = %appointment.time,
            "booking confirmed; session reset"
        );
        Ok(appointment)
    }

    fn booking_mut(&mut self) -> Result<&mut BookingData, TransitionError> {
        if self.session.step != Step::Booking {
            return Err(TransitionError::BookingClosed {
                step: self.session.step,
            });
        }
        Ok(&mut self.session.booking)
    }

    fn check(&self, trigger: Trigger) -> Result<Step, TransitionError> {
        next_step(self.session.step, trigger).ok_or_else(|| {
            debug!(step = %self.session.step, %trigger, "transition refused");
            TransitionError::NotAllowed {
                from: self.session.step,
                trigger,
            }
        })
    }

    fn enter(&mut self, to: Step, trigger: Trigger) {
        debug!(from = %self.session.step, to = %to, %trigger, "step transition");
        self.session.step = to;
    }

    /// Single atomic reset: cancels any pending job, replaces the whole session
    /// and moves to a new generation.
    fn reset(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel();
        }
        self.session = Session::default();
        self.generation += 1;
    }
}

impl std::fmt::Debug for SessionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStateMachine")
            .field("session", &self.session)
            .field("generation", &self.generation)
            .field("job", &self.job)
            .finish()
    }
}
