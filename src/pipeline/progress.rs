use std::{
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    success,
    types::{FailedTrackRow, Track},
    warning,
};

/// Aggregated outcome of a run.
///
/// `success.len() + failures.len()` never exceeds `expected`; it equals
/// `expected` once every job has settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStatus {
    pub expected: usize,
    pub success: Vec<Track>,
    pub failures: Vec<Track>,
}

impl DownloadStatus {
    pub fn new(expected: usize) -> Self {
        DownloadStatus {
            expected,
            ..Default::default()
        }
    }

    pub fn settled(&self) -> usize {
        self.success.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.settled() == self.expected
    }
}

struct TrackerState {
    status: DownloadStatus,
    summarized: bool,
}

/// Shared progress display and counters for one run.
///
/// Workers call [`ProgressTracker::record_outcome`] once per settled job.
/// Each update happens under a mutex that is never held across an await, so
/// concurrent workers cannot lose or double-count outcomes. The summary is
/// printed exactly once, by the update that settles the last expected job,
/// or by [`ProgressTracker::finish`] when nothing was expected.
pub struct ProgressTracker {
    state: Mutex<TrackerState>,
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn new(expected: usize) -> Self {
        let bar = ProgressBar::new(expected as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .progress_chars("=> "),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self::with_bar(expected, bar)
    }

    /// Tracker without terminal output for the bar itself.
    pub fn hidden(expected: usize) -> Self {
        Self::with_bar(expected, ProgressBar::hidden())
    }

    fn with_bar(expected: usize, bar: ProgressBar) -> Self {
        bar.set_message(counts_message(0, 0));
        ProgressTracker {
            state: Mutex::new(TrackerState {
                status: DownloadStatus::new(expected),
                summarized: false,
            }),
            bar,
        }
    }

    /// Records the terminal outcome of one job.
    ///
    /// Returns `false` and ignores the update when every expected job has
    /// already settled.
    pub fn record_outcome(&self, track: &Track, succeeded: bool) -> bool {
        let summary = {
            let mut guard = self.lock();
            let state = &mut *guard;
            let status = &mut state.status;
            if status.settled() >= status.expected {
                drop(guard);
                self.suspend(|| {
                    warning!(
                        "Ignoring outcome for {} - {}: all tracks already settled",
                        track.name,
                        track.artist
                    )
                });
                return false;
            }

            if succeeded {
                status.success.push(track.clone());
            } else {
                status.failures.push(track.clone());
            }

            self.bar.set_position(status.settled() as u64);
            self.bar
                .set_message(counts_message(status.success.len(), status.failures.len()));

            if status.is_complete() && !state.summarized {
                state.summarized = true;
                Some(status.clone())
            } else {
                None
            }
        };

        if let Some(status) = summary {
            self.bar.finish_and_clear();
            print_summary(&status);
        }

        true
    }

    /// Prints the summary if no update has done so yet and returns the final status.
    pub fn finish(&self) -> DownloadStatus {
        let (status, print) = {
            let mut state = self.lock();
            let print = !state.summarized;
            state.summarized = true;
            (state.status.clone(), print)
        };

        if print {
            self.bar.finish_and_clear();
            print_summary(&status);
        }

        status
    }

    pub fn snapshot(&self) -> DownloadStatus {
        self.lock().status.clone()
    }

    /// Runs `f` with the bar hidden, for printing whole lines.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn counts_message(success: usize, failures: usize) -> String {
    format!("✓ {success}  ✗ {failures}")
}

pub fn print_summary(status: &DownloadStatus) {
    let line = format!(
        "Total: {}, Successful: {}, Failures: {}",
        status.expected,
        status.success.len(),
        status.failures.len()
    );

    if status.failures.is_empty() {
        success!("{}", line);
        return;
    }

    warning!("{}", line);
    let rows: Vec<FailedTrackRow> = status.failures.iter().map(FailedTrackRow::from).collect();
    println!("{}", Table::new(rows));
}
