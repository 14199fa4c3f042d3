//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into `DomainError`. `TransitionError`
//! is a refused session transition: the session is left unchanged.

use super::entities::{Step, Trigger};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Symptom catalog error: {0}")]
    Catalog(String),

    #[error("Provider directory error: {0}")]
    Directory(String),

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Booking failed: {0}")]
    Booking(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{trigger}' is not allowed from step '{from}'")]
    NotAllowed { from: Step, trigger: Trigger },

    #[error("select at least one symptom before requesting analysis")]
    EmptySelection,

    #[error("booking needs both a date and a time")]
    IncompleteBooking,

    #[error("no provider selected")]
    NoProviderSelected,

    #[error("booking can only be edited in the booking step (now '{step}')")]
    BookingClosed { step: Step },
}
