//! Implements InputPort. Inquire-based interactive wizard.
//!
//! One `SessionStateMachine` per run; every screen is a read-only view of it
//! plus the prompts that fire its transitions.

use crate::adapters::ui::progress::analysis_spinner;
use crate::domain::{
    Condition, ConditionRuleEngine, ConditionSeverity, DiseaseInfo, Doctor, DomainError, Step,
    Symptom, SymptomSeverity, UrgencyLevel,
};
use crate::ports::InputPort;
use crate::usecases::{BookingService, LookupService, SessionStateMachine};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use crossterm::style::Stylize;
use inquire::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{DateSelect, Select, Text};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Applies the prompt theme globally. Called from `init_ui`.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("+").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

const BOOKED_MESSAGE: &str =
    "Appointment booked successfully! You will receive a confirmation email shortly.";

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// Whether the wizard loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputAction {
    Add,
    Remove,
    Analyze(usize),
    Lookup,
    Quit,
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputAction::Add => f.write_str("Add a symptom"),
            InputAction::Remove => f.write_str("Remove a symptom"),
            InputAction::Analyze(n) => write!(f, "Analyze symptoms ({})", n),
            InputAction::Lookup => f.write_str("Look up a disease"),
            InputAction::Quit => f.write_str("Quit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultsAction {
    FindProviders,
    NewAnalysis,
    Quit,
}

impl fmt::Display for ResultsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultsAction::FindProviders => "Find healthcare providers",
            ResultsAction::NewAnalysis => "Start new analysis",
            ResultsAction::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookingAction {
    Confirm,
    Back,
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingAction::Confirm => "Confirm booking",
            BookingAction::Back => "Back to providers",
        })
    }
}

struct SymptomChoice(Symptom);

impl fmt::Display for SymptomChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.0.name, self.0.severity)
    }
}

enum DoctorChoice {
    Doctor(Doctor),
    Back,
}

impl fmt::Display for DoctorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorChoice::Doctor(d) => write!(
                f,
                "{} - {} ({:.1} stars, {})",
                d.name, d.specialty, d.rating, d.distance
            ),
            DoctorChoice::Back => f.write_str("Back to results"),
        }
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    engine: Arc<ConditionRuleEngine>,
    analysis_delay: Duration,
    lookup: Arc<LookupService>,
    booking: Arc<BookingService>,
}

impl TuiInputPort {
    pub fn new(
        engine: Arc<ConditionRuleEngine>,
        analysis_delay: Duration,
        lookup: Arc<LookupService>,
        booking: Arc<BookingService>,
    ) -> Self {
        Self {
            engine,
            analysis_delay,
            lookup,
            booking,
        }
    }

    async fn input_step(&self, session: &mut SessionStateMachine) -> Result<Flow, DomainError> {
        print_selection(session.symptoms().as_slice());

        let count = session.symptoms().len();
        let mut actions = vec![InputAction::Add];
        if count > 0 {
            actions.push(InputAction::Remove);
            actions.push(InputAction::Analyze(count));
        }
        actions.push(InputAction::Lookup);
        actions.push(InputAction::Quit);

        let Some(action) = Select::new("What would you like to do?", actions)
            .prompt_skippable()
            .map_err(ui_err)?
        else {
            return Ok(Flow::Quit);
        };

        match action {
            InputAction::Add => self.add_symptom(session).await?,
            InputAction::Remove => {
                let choices: Vec<SymptomChoice> = session
                    .symptoms()
                    .iter()
                    .cloned()
                    .map(SymptomChoice)
                    .collect();
                if let Some(choice) = Select::new("Remove which symptom?", choices)
                    .prompt_skippable()
                    .map_err(ui_err)?
                {
                    session.remove_symptom(&choice.0.id);
                }
            }
            InputAction::Analyze(_) => {
                if let Err(e) = session.request_analysis() {
                    println!("{}", e.to_string().yellow());
                }
            }
            InputAction::Lookup => session.open_disease_lookup()?,
            InputAction::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn add_symptom(&self, session: &mut SessionStateMachine) -> Result<(), DomainError> {
        let Some(query) = Text::new("Type a symptom:")
            .with_help_message("e.g. headache, chest pain, nausea, joint pain")
            .prompt_skippable()
            .map_err(ui_err)?
        else {
            return Ok(());
        };

        let suggestions = self
            .lookup
            .suggest_symptoms(&query, session.symptoms())
            .await?;
        if suggestions.is_empty() {
            println!("No matching symptoms for '{}'.", query.trim());
            return Ok(());
        }

        let choices: Vec<SymptomChoice> = suggestions.into_iter().map(SymptomChoice).collect();
        if let Some(choice) = Select::new("Select a symptom:", choices)
            .prompt_skippable()
            .map_err(ui_err)?
        {
            session.add_symptom(choice.0);
        }
        Ok(())
    }

    async fn analyzing_step(&self, session: &mut SessionStateMachine) {
        let spinner = analysis_spinner(session.symptoms().len());
        let applied = session.wait_for_analysis().await;
        spinner.finish_and_clear();
        if !applied {
            warn!(step = %session.step(), "analysis produced no result");
        }
    }

    async fn doctors_step(&self, session: &mut SessionStateMachine) -> Result<Flow, DomainError> {
        let doctors = self.booking.providers().await?;
        println!();
        println!("{}", "Recommended healthcare providers".bold());
        for d in &doctors {
            println!("  {} | {} | {}", d.name, d.address, d.phone);
        }

        let mut choices: Vec<DoctorChoice> =
            doctors.into_iter().map(DoctorChoice::Doctor).collect();
        choices.push(DoctorChoice::Back);

        match Select::new("Book an appointment with:", choices)
            .prompt_skippable()
            .map_err(ui_err)?
        {
            Some(DoctorChoice::Doctor(doctor)) => session.select_doctor(doctor)?,
            Some(DoctorChoice::Back) | None => {
                session.back()?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn booking_step(&self, session: &mut SessionStateMachine) -> Result<Flow, DomainError> {
        let Some(doctor) = session.selected_doctor().cloned() else {
            session.back()?;
            return Ok(Flow::Continue);
        };
        println!();
        let name = doctor.name.as_str();
        println!("{} {}", "Book appointment with".bold(), name.bold());
        println!("  {}", doctor.address);

        let Some(date) = prompt_date()? else {
            session.back()?;
            return Ok(Flow::Continue);
        };
        session.set_booking_date(date)?;

        let Some(time) = Select::new("Available time slots:", doctor.available_slots.clone())
            .prompt_skippable()
            .map_err(ui_err)?
        else {
            session.back()?;
            return Ok(Flow::Continue);
        };
        session.set_booking_time(time)?;

        let notes = Text::new("Additional notes (optional):")
            .prompt_skippable()
            .map_err(ui_err)?
            .unwrap_or_default();
        session.set_booking_notes(notes)?;

        let action = Select::new(
            "Confirm this appointment?",
            vec![BookingAction::Confirm, BookingAction::Back],
        )
        .prompt_skippable()
        .map_err(ui_err)?;

        match action {
            Some(BookingAction::Confirm) => match self.booking.confirm(session).await {
                Ok(appointment) => {
                    println!();
                    println!("{}", BOOKED_MESSAGE.green());
                    println!(
                        "  {} on {} at {}",
                        appointment.doctor.name, appointment.date, appointment.time
                    );
                    println!();
                }
                Err(e) => {
                    warn!(error = %e, "booking failed");
                    println!("{}", format!("Booking failed: {}", e).red());
                }
            },
            Some(BookingAction::Back) | None => {
                session.back()?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn lookup_step(&self, session: &mut SessionStateMachine) -> Result<Flow, DomainError> {
        let query = Text::new("Disease name or keyword:")
            .with_help_message("Esc to return")
            .prompt_skippable()
            .map_err(ui_err)?;

        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            session.back()?;
            return Ok(Flow::Continue);
        };

        let found = self.lookup.search_diseases(&query).await?;
        if found.is_empty() {
            println!("No diseases match '{}'.", query.trim());
        }
        for disease in &found {
            print_disease(disease);
        }
        Ok(Flow::Continue)
    }
}

fn results_step(session: &mut SessionStateMachine) -> Result<Flow, DomainError> {
    println!();
    println!("{}", "Analysis results".bold());
    for (i, condition) in session.results().iter().enumerate() {
        print_condition(i + 1, condition);
    }
    if let Some(verdict) = session.urgency() {
        let label = verdict.level.to_string().to_uppercase();
        let label = match verdict.level {
            UrgencyLevel::Urgent => label.red().bold(),
            UrgencyLevel::Moderate => label.yellow().bold(),
            UrgencyLevel::Routine => label.green().bold(),
        };
        println!("Urgency: {} - {}", label, verdict.message);
    }
    println!();

    let action = Select::new(
        "Next step:",
        vec![
            ResultsAction::FindProviders,
            ResultsAction::NewAnalysis,
            ResultsAction::Quit,
        ],
    )
    .prompt_skippable()
    .map_err(ui_err)?;

    match action {
        Some(ResultsAction::FindProviders) => session.request_providers()?,
        Some(ResultsAction::NewAnalysis) => session.new_analysis()?,
        Some(ResultsAction::Quit) | None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn prompt_date() -> Result<Option<NaiveDate>, DomainError> {
    DateSelect::new("Select date:")
        .with_min_date(Local::now().date_naive())
        .prompt_skippable()
        .map_err(ui_err)
}

fn print_selection(symptoms: &[Symptom]) {
    println!();
    if symptoms.is_empty() {
        println!("No symptoms selected yet.");
        return;
    }
    println!("{}", "Selected symptoms:".bold());
    for s in symptoms {
        let severity = match s.severity {
            SymptomSeverity::Mild => s.severity.as_str().green(),
            SymptomSeverity::Moderate => s.severity.as_str().yellow(),
            SymptomSeverity::Severe => s.severity.as_str().red(),
        };
        println!("  - {} [{}]", s.name, severity);
    }
}

fn print_condition(rank: usize, c: &Condition) {
    let severity = c.severity.to_string();
    let severity = match c.severity {
        ConditionSeverity::Low => severity.green(),
        ConditionSeverity::Medium => severity.yellow(),
        ConditionSeverity::High => severity.red(),
    };
    println!(
        "  {}. {} - {}% match [{}]",
        rank,
        c.name.as_str().bold(),
        c.confidence,
        severity
    );
    println!("     {}", c.description);
    for r in &c.recommendations {
        println!("     * {}", r);
    }
}

fn print_disease(d: &DiseaseInfo) {
    println!();
    println!("{} [{}]", d.name.as_str().bold(), d.severity);
    println!("  {}", d.description);
    if !d.related_symptoms.is_empty() {
        println!("  Related symptoms: {}", d.related_symptoms.join(", "));
    }
    for r in &d.recommendations {
        println!("  * {}", r);
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut session = SessionStateMachine::new(Arc::clone(&self.engine), self.analysis_delay);
        info!("wizard started");

        loop {
            let flow = match session.step() {
                Step::Input => self.input_step(&mut session).await?,
                Step::Analyzing => {
                    self.analyzing_step(&mut session).await;
                    Flow::Continue
                }
                Step::Results => results_step(&mut session)?,
                Step::Doctors => self.doctors_step(&mut session).await?,
                Step::Booking => self.booking_step(&mut session).await?,
                Step::DiseaseLookup => self.lookup_step(&mut session).await?,
            };
            if flow == Flow::Quit {
                info!(step = %session.step(), "wizard closed");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels() {
        assert_eq!(InputAction::Analyze(2).to_string(), "Analyze symptoms (2)");
        let choice = SymptomChoice(Symptom::new("21", "Chest pain", SymptomSeverity::Severe));
        assert_eq!(choice.to_string(), "Chest pain [severe]");
        assert_eq!(DoctorChoice::Back.to_string(), "Back to results");
    }
}
