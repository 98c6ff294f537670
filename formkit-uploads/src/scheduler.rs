//! Fallback cleanup scheduling.
//!
//! Every private upload schedules a deferred purge for its `(field, form)`
//! pair before the transfer starts, so even submissions that never reach
//! the completion event get cleaned up. Delivery is fire-and-forget,
//! at-least-once: the purge itself is idempotent.

use formkit_types::{FieldId, FormId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Arguments carried by a scheduled purge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurgeJob {
    pub field_id: FieldId,
    pub form_id: FormId,
}

/// Scheduled-timer service consumed by the upload manager.
pub trait Scheduler: Send + Sync {
    /// Schedules `job` to run after `delay`. Fire-and-forget.
    fn schedule(&self, delay: Duration, job: PurgeJob);
}

/// Tokio-backed scheduler: one sleeping task per job.
///
/// Must be constructed and used inside a Tokio runtime. The callback
/// typically calls `UploadManager::cleanup_via_cron`.
pub struct TokioScheduler {
    callback: Arc<dyn Fn(PurgeJob) + Send + Sync>,
}

impl TokioScheduler {
    pub fn new(callback: Arc<dyn Fn(PurgeJob) + Send + Sync>) -> Self {
        Self { callback }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: PurgeJob) {
        debug!(field_id = %job.field_id, form_id = %job.form_id, ?delay, "scheduling fallback purge");
        let callback = Arc::clone(&self.callback);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(job);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn job(field: &str, form: &str) -> PurgeJob {
        PurgeJob {
            field_id: FieldId::new(field).unwrap(),
            form_id: FormId::new(form).unwrap(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let fired: Arc<Mutex<Vec<PurgeJob>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let scheduler = TokioScheduler::new(Arc::new(move |job| {
            sink.lock().unwrap().push(job);
        }));

        scheduler.schedule(Duration::from_secs(3600), job("f1", "form9"));
        tokio::task::yield_now().await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_secs(3601)).await;
        tokio::task::yield_now().await;
        assert_eq!(*fired.lock().unwrap(), vec![job("f1", "form9")]);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_jobs_fire_independently() {
        let fired: Arc<Mutex<Vec<PurgeJob>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let scheduler = TokioScheduler::new(Arc::new(move |job| {
            sink.lock().unwrap().push(job);
        }));

        scheduler.schedule(Duration::from_secs(10), job("f1", "form9"));
        scheduler.schedule(Duration::from_secs(20), job("f2", "form9"));
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.lock().unwrap().len(), 1);

        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.lock().unwrap().len(), 2);
    }

    #[test]
    fn purge_job_serializes_for_cron_args() {
        let job = job("f1", "form9");
        let json = serde_json::to_string(&job).unwrap();
        let back: PurgeJob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }
}
