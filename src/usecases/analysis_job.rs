//! Background analysis task: waits the configured latency, then runs the rule engine.
//!
//! Each job is tagged with the session generation it was started for. The
//! session applies a completion only if that tag still matches, so a late
//! result can never land in a session that moved on or was reset.

use crate::domain::{AnalysisResult, ConditionRuleEngine, SelectedSymptomSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of a finished job, still carrying its generation tag.
///
/// Only built inside the crate, from engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCompletion {
    pub(crate) generation: u64,
    pub(crate) results: AnalysisResult,
}

impl AnalysisCompletion {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &AnalysisResult {
        &self.results
    }
}

/// Handle to one in-flight analysis. Dropping it aborts the task.
pub struct AnalysisJob {
    generation: u64,
    handle: JoinHandle<AnalysisResult>,
}

impl AnalysisJob {
    /// Spawn on the current tokio runtime. Works on a snapshot of `symptoms`.
    pub fn spawn(
        generation: u64,
        engine: Arc<ConditionRuleEngine>,
        symptoms: SelectedSymptomSet,
        delay: Duration,
    ) -> Self {
        debug!(
            generation,
            symptoms = symptoms.len(),
            delay_ms = delay.as_millis() as u64,
            "analysis job scheduled"
        );
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.evaluate(&symptoms)
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the task. A no-op if it already finished.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the job. `None` if it was cancelled or the task failed.
    pub async fn join(mut self) -> Option<AnalysisCompletion> {
        match (&mut self.handle).await {
            Ok(results) => Some(AnalysisCompletion {
                generation: self.generation,
                results,
            }),
            Err(e) if e.is_cancelled() => {
                debug!(generation = self.generation, "analysis job cancelled");
                None
            }
            Err(e) => {
                warn!(generation = self.generation, error = %e, "analysis job failed");
                None
            }
        }
    }
}

impl Drop for AnalysisJob {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl std::fmt::Debug for AnalysisJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisJob")
            .field("generation", &self.generation)
            .field("finished", &self.handle.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Symptom, SymptomSeverity};

    fn selection() -> SelectedSymptomSet {
        [Symptom::new("21", "Chest pain", SymptomSeverity::Severe)]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_job_completes_with_generation_tag() {
        let engine = Arc::new(ConditionRuleEngine::default());
        let job = AnalysisJob::spawn(7, engine, selection(), Duration::from_millis(5));
        assert_eq!(job.generation(), 7);

        let completion = job.join().await.unwrap();
        assert_eq!(completion.generation(), 7);
        assert_eq!(completion.results().top().unwrap().name, "Angina");
    }

    #[tokio::test]
    async fn test_cancelled_job_yields_nothing() {
        let engine = Arc::new(ConditionRuleEngine::default());
        let job = AnalysisJob::spawn(1, engine, selection(), Duration::from_secs(60));
        job.cancel();
        assert!(job.join().await.is_none());
    }
}
