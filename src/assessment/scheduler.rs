//! Per-session assessment scheduling.
//!
//! Every successful conversion may trigger an assessment. When a newer
//! conversion arrives for the same session, the older assessment is stale, so
//! its task is aborted rather than left to finish.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::error::EngineResult;
use crate::models::ConversionResult;

use super::client::Assessor;

/// How an assessment task ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    /// The assessor returned text.
    Completed(String),
    /// The assessor failed; holds the failure description.
    Failed(String),
    /// A newer submission for the same session cancelled this one.
    Superseded,
}

type InFlight = HashMap<String, (u64, AbortHandle)>;

/// Runs assessments as background tasks, at most one per session.
pub struct AssessmentScheduler {
    assessor: Arc<dyn Assessor>,
    in_flight: Arc<Mutex<InFlight>>,
    next_ticket: AtomicU64,
}

/// Handle to a submitted assessment.
#[derive(Debug)]
pub struct PendingAssessment {
    session_id: String,
    handle: JoinHandle<EngineResult<String>>,
}

impl PendingAssessment {
    /// Waits for the task and reports how it ended.
    pub async fn outcome(self) -> AssessmentOutcome {
        match self.handle.await {
            Ok(Ok(text)) => AssessmentOutcome::Completed(text),
            Ok(Err(err)) => {
                warn!(session_id = %self.session_id, error = %err, "Assessment failed");
                AssessmentOutcome::Failed(err.to_string())
            }
            Err(err) if err.is_cancelled() => {
                debug!(session_id = %self.session_id, "Assessment superseded");
                AssessmentOutcome::Superseded
            }
            Err(err) => AssessmentOutcome::Failed(format!("assessment task panicked: {}", err)),
        }
    }
}

impl AssessmentScheduler {
    /// Creates a scheduler around an assessor.
    pub fn new(assessor: Arc<dyn Assessor>) -> Self {
        Self {
            assessor,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Returns the underlying assessor.
    pub fn assessor(&self) -> &Arc<dyn Assessor> {
        &self.assessor
    }

    /// Starts an assessment for `session_id`, aborting any assessment still
    /// running for that session.
    pub fn submit(&self, session_id: &str, result: ConversionResult) -> PendingAssessment {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let assessor = Arc::clone(&self.assessor);
        let in_flight = Arc::clone(&self.in_flight);
        let key = session_id.to_string();

        // Held across spawn so the task cannot deregister before it is registered.
        let mut guard = lock(&self.in_flight);

        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let outcome = assessor.assess(&result).await;
            let mut guard = lock(&in_flight);
            if guard.get(&task_key).is_some_and(|(t, _)| *t == ticket) {
                guard.remove(&task_key);
            }
            outcome
        });

        if let Some((previous, abort)) = guard.insert(key.clone(), (ticket, handle.abort_handle())) {
            info!(session_id = %key, previous_ticket = previous, ticket, "Superseding in-flight assessment");
            abort.abort();
        }
        drop(guard);

        PendingAssessment {
            session_id: key,
            handle,
        }
    }

    /// Submits an assessment and waits for its outcome.
    pub async fn run(&self, session_id: &str, result: ConversionResult) -> AssessmentOutcome {
        self.submit(session_id, result).outcome().await
    }

    /// Number of sessions with an assessment still running.
    pub fn in_flight(&self) -> usize {
        lock(&self.in_flight).len()
    }
}

fn lock(in_flight: &Mutex<InFlight>) -> MutexGuard<'_, InFlight> {
    in_flight
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn result_with_gross(gross: rust_decimal::Decimal) -> ConversionResult {
        ConversionResult {
            gross,
            net: dec!(0.00),
            employer_cost: gross,
            income_tax: dec!(0.00),
            social_tax: dec!(0.00),
            pension_contribution: dec!(0.00),
            unemployment_employee: dec!(0.00),
            unemployment_employer: dec!(0.00),
        }
    }

    /// Echoes the gross salary, blocking until released for gross 1000.
    struct GatedAssessor {
        gate: Notify,
    }

    #[async_trait]
    impl Assessor for GatedAssessor {
        async fn assess(&self, result: &ConversionResult) -> EngineResult<String> {
            if result.gross == dec!(1000.00) {
                self.gate.notified().await;
            }
            Ok(format!("gross {}", result.gross))
        }
    }

    struct FailingAssessor;

    #[async_trait]
    impl Assessor for FailingAssessor {
        async fn assess(&self, _result: &ConversionResult) -> EngineResult<String> {
            Err(EngineError::AssessmentFailed {
                message: "upstream unavailable".to_string(),
            })
        }
    }

    fn gated_scheduler() -> AssessmentScheduler {
        AssessmentScheduler::new(Arc::new(GatedAssessor {
            gate: Notify::new(),
        }))
    }

    #[tokio::test]
    async fn test_completed_assessment_returns_text() {
        let scheduler = gated_scheduler();
        let outcome = scheduler.run("s1", result_with_gross(dec!(2000.00))).await;

        assert_eq!(outcome, AssessmentOutcome::Completed("gross 2000.00".to_string()));
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_newer_submission_supersedes_older() {
        let scheduler = gated_scheduler();

        let first = scheduler.submit("s1", result_with_gross(dec!(1000.00)));
        let second = scheduler.submit("s1", result_with_gross(dec!(2000.00)));

        assert_eq!(first.outcome().await, AssessmentOutcome::Superseded);
        assert_eq!(
            second.outcome().await,
            AssessmentOutcome::Completed("gross 2000.00".to_string())
        );
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_sessions_do_not_cancel_each_other() {
        let scheduler = gated_scheduler();

        let blocked = scheduler.submit("s1", result_with_gross(dec!(1000.00)));
        let other = scheduler.run("s2", result_with_gross(dec!(3000.00))).await;

        assert_eq!(other, AssessmentOutcome::Completed("gross 3000.00".to_string()));
        assert_eq!(scheduler.in_flight(), 1);

        blocked.handle.abort();
        assert_eq!(blocked.outcome().await, AssessmentOutcome::Superseded);
    }

    #[tokio::test]
    async fn test_released_assessment_completes() {
        let assessor = Arc::new(GatedAssessor {
            gate: Notify::new(),
        });
        let scheduler = AssessmentScheduler::new(assessor.clone());

        let pending = scheduler.submit("s1", result_with_gross(dec!(1000.00)));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assessor.gate.notify_one();

        assert_eq!(
            pending.outcome().await,
            AssessmentOutcome::Completed("gross 1000.00".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let scheduler = AssessmentScheduler::new(Arc::new(FailingAssessor));
        match scheduler.run("s1", result_with_gross(dec!(2000.00))).await {
            AssessmentOutcome::Failed(message) => assert!(message.contains("upstream unavailable")),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(AssessmentOutcome::Completed("Fine.".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "completed", "text": "Fine." }));

        let json = serde_json::to_value(AssessmentOutcome::Superseded).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "superseded" }));
    }
}
