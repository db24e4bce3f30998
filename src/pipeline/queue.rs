use std::{future::Future, sync::Arc};

use tokio::{sync::Semaphore, task::JoinError};

/// Runs jobs with a fixed upper bound on how many are in flight.
///
/// Jobs are dispatched in submission order: a job is only spawned once a
/// permit is free, so at most `concurrency` jobs have started and not yet
/// finished at any time. [`WorkQueue::settle_all`] returns after every job
/// has finished, whatever its outcome. A failing or panicking job never
/// stops the others.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    concurrency: usize,
}

impl WorkQueue {
    pub fn new(concurrency: usize) -> Self {
        WorkQueue {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs all `jobs` and returns their results in submission order.
    ///
    /// A job that panics yields `Err(JoinError)` at its index instead of a value.
    pub async fn settle_all<T, F, Fut>(&self, jobs: Vec<F>) -> Vec<Result<T, JoinError>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(jobs.len());

        for job in jobs {
            // the semaphore is owned here and never closed
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                job().await
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await);
        }

        results
    }
}
