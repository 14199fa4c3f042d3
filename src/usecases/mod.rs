//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_job;
pub mod booking_service;
pub mod lookup_service;
pub mod session;

pub use analysis_job::{AnalysisCompletion, AnalysisJob};
pub use booking_service::BookingService;
pub use lookup_service::LookupService;
pub use session::{Session, SessionStateMachine, next_step};
