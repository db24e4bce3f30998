//! # Download Pipeline
//!
//! Turns a list of [`Job`]s into downloaded files and a [`DownloadStatus`].
//!
//! ```text
//! jobs ──▶ WorkQueue (≤ K in flight)
//!            └─▶ RetryPolicy (≤ M attempts, flat delay)
//!                  └─▶ TrackFetcher (lookup → audio + cover → write → tag)
//!            ◀── terminal outcome
//!        ProgressTracker::record_outcome (once per job)
//! ```
//!
//! Per-track errors stay inside this module. Callers only see the counts
//! and track lists of the returned status.

pub mod progress;
pub mod queue;
pub mod retry;

use std::sync::Arc;

use crate::{failure, fetcher::TrackFetcher, success, types::Job};

pub use progress::{DownloadStatus, ProgressTracker};
pub use queue::WorkQueue;
pub use retry::{RetryPolicy, Settled};

/// Downloads every job and waits until all of them have settled.
///
/// Each job is retried according to `policy`. Its terminal outcome is
/// printed as one line and recorded in `tracker`. Jobs whose task panicked
/// are counted as failures. Returns the final status after the summary has
/// been printed.
pub async fn run_jobs(
    jobs: Vec<Job>,
    fetcher: Arc<dyn TrackFetcher>,
    queue: &WorkQueue,
    policy: RetryPolicy,
    tracker: Arc<ProgressTracker>,
) -> DownloadStatus {
    let thunks = jobs
        .iter()
        .cloned()
        .map(|job| {
            let fetcher = Arc::clone(&fetcher);
            let tracker = Arc::clone(&tracker);
            move || async move {
                let settled = policy.run(|_attempt| fetcher.fetch(&job)).await;
                report(&tracker, &job, &settled);
                tracker.record_outcome(&job.track, settled.is_success());
            }
        })
        .collect::<Vec<_>>();

    let results = queue.settle_all(thunks).await;

    for (job, result) in jobs.iter().zip(results) {
        if let Err(e) = result {
            tracker.suspend(|| {
                failure!(
                    "{} - {} aborted: {}",
                    job.track.name,
                    job.track.artist,
                    e
                )
            });
            tracker.record_outcome(&job.track, false);
        }
    }

    tracker.finish()
}

fn report<T, E: std::fmt::Display>(tracker: &ProgressTracker, job: &Job, settled: &Settled<T, E>) {
    let position = job
        .position
        .map(|p| format!("{p:>3}. "))
        .unwrap_or_default();

    tracker.suspend(|| match &settled.result {
        Ok(_) => success!("{}{} - {}", position, job.track.name, job.track.artist),
        Err(e) => failure!(
            "{}{} - {} failed after {} attempts: {}",
            position,
            job.track.name,
            job.track.artist,
            settled.attempts,
            e
        ),
    });
}
