//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use symptom_triage::adapters::catalog::{
    RuleDiseaseCatalog, StaticSymptomCatalog, load_symptom_csv,
};
use symptom_triage::adapters::directory::StaticProviderDirectory;
use symptom_triage::adapters::persistence::BookingJson;
use symptom_triage::adapters::ui::tui::TuiInputPort;
use symptom_triage::domain::ConditionRuleEngine;
use symptom_triage::ports::{
    BookingPort, DiseaseCatalogPort, InputPort, ProviderDirectoryPort, SymptomCatalogPort,
};
use symptom_triage::shared::config::AppConfig;
use symptom_triage::usecases::{BookingService, LookupService};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr so they do not interleave with the prompts on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    // --- Reference data ---
    let symptoms: Arc<dyn SymptomCatalogPort> = match cfg.symptom_catalog_path() {
        Some(path) => Arc::new(load_symptom_csv(&path).await?),
        None => {
            let catalog = StaticSymptomCatalog::new();
            info!(count = catalog.len(), "using built-in symptom catalog");
            Arc::new(catalog)
        }
    };
    let diseases: Arc<dyn DiseaseCatalogPort> = Arc::new(RuleDiseaseCatalog::new());

    // --- Provider directory and booking store ---
    let providers: Arc<dyn ProviderDirectoryPort> = Arc::new(StaticProviderDirectory::new());
    let bookings_path = cfg.bookings_path();
    let booking_store = BookingJson::new(&bookings_path);
    booking_store.load().await?;
    let bookings: Arc<dyn BookingPort> = Arc::new(booking_store);

    // --- Engine and services ---
    let engine = Arc::new(ConditionRuleEngine::default());
    let analysis_delay = cfg.analysis_delay();
    info!(
        rules = engine.rules().len(),
        analysis_delay_ms = analysis_delay.as_millis() as u64,
        bookings = %bookings_path.display(),
        "symptom checker ready"
    );

    let suggestion_limit = cfg.suggestion_limit_or_default();
    let lookup = Arc::new(LookupService::new(symptoms, diseases, suggestion_limit));
    let booking = Arc::new(BookingService::new(providers, bookings));

    symptom_triage::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(engine, analysis_delay, lookup, booking));

    input_port.run().await?;

    Ok(())
}
