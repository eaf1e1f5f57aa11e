//! # Background batch jobs
//!
//! Fire-and-poll execution of CSV batches: [`JobRegistry::submit`] spawns a
//! worker thread and returns a monotonic [`JobId`] immediately; the caller
//! polls [`JobRegistry::status`] until the job reports
//! [`JobState::Finished`] or [`JobState::Failed`].
//!
//! The registry is cheap to clone; clones share the same job table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use serde::Serialize;

use crate::constants::FastHashMap;
use crate::exoscore_errors::ExoscoreError;
use crate::pipeline::{score_csv, BatchOutcome};
use crate::scoring::ScoringEngine;

/// Monotonically increasing job identifier, unique within one registry.
pub type JobId = u64;

/// Lifecycle of one batch job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Finished(Box<BatchOutcome>),
    Failed { message: String },
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished(_) | JobState::Failed { .. })
    }
}

/// Shared table of batch jobs and their states.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<FastHashMap<JobId, JobState>>>,
    next_id: Arc<AtomicU64>,
}

impl JobRegistry {
    pub fn new() -> Self {
        JobRegistry::default()
    }

    fn lock(&self) -> MutexGuard<'_, FastHashMap<JobId, JobState>> {
        // A worker that panicked mid-update only ever wrote a whole state,
        // so the table stays coherent after poisoning.
        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, id: JobId, state: JobState) {
        self.lock().insert(id, state);
    }

    /// Queue a CSV batch and process it on a worker thread.
    ///
    /// Arguments
    /// -----------------
    /// * `csv_content`: the full catalog file, headers included.
    /// * `engine`: the shared scoring engine used by the worker.
    ///
    /// Return
    /// ----------
    /// * The [`JobId`] to poll with [`status`](Self::status).
    pub fn submit(&self, csv_content: String, engine: Arc<ScoringEngine>) -> JobId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.set_state(id, JobState::Queued);

        let registry = self.clone();
        thread::spawn(move || {
            registry.set_state(id, JobState::Running);
            let state = match score_csv(csv_content.as_bytes(), &engine) {
                Ok(outcome) => JobState::Finished(Box::new(outcome)),
                Err(err) => JobState::Failed {
                    message: err.to_string(),
                },
            };
            registry.set_state(id, state);
        });

        id
    }

    /// Snapshot of a job's current state.
    pub fn status(&self, id: JobId) -> Result<JobState, ExoscoreError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(ExoscoreError::JobNotFound(id))
    }

    /// Number of jobs ever submitted to this registry.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod jobs_test {
    use std::time::{Duration, Instant};

    use super::*;

    const CSV: &str = "\
pl_name,sy_dist,st_spectype,pl_rade,pl_orbper,st_mass
Proxima b,1.30,M5V,0.095,11.2,0.12
";

    fn wait_terminal(registry: &JobRegistry, id: JobId) -> JobState {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let state = registry.status(id).unwrap();
            if state.is_terminal() {
                return state;
            }
            assert!(Instant::now() < deadline, "job {id} never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_job_runs_to_finished() {
        let registry = JobRegistry::new();
        let engine = Arc::new(ScoringEngine::default());
        let id = registry.submit(CSV.to_string(), engine);

        match wait_terminal(&registry, id) {
            JobState::Finished(outcome) => {
                assert_eq!(outcome.results.len(), 1);
                assert_eq!(outcome.results[0].target_name, "Proxima b");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_bad_input_fails_the_job() {
        let registry = JobRegistry::new();
        let engine = Arc::new(ScoringEngine::default());
        let id = registry.submit("nothing,useful\n1,2\n".to_string(), engine);

        match wait_terminal(&registry, id) {
            JobState::Failed { message } => assert!(!message.is_empty()),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_ids_are_monotonic_and_unknown_id_errors() {
        let registry = JobRegistry::new();
        let engine = Arc::new(ScoringEngine::default());
        let first = registry.submit(CSV.to_string(), Arc::clone(&engine));
        let second = registry.submit(CSV.to_string(), engine);

        assert!(second > first);
        assert_eq!(
            registry.status(9999).unwrap_err(),
            ExoscoreError::JobNotFound(9999)
        );

        wait_terminal(&registry, first);
        wait_terminal(&registry, second);
    }
}
