//! # CLI Module
//!
//! This module provides the command-line layer of spotify-dl. It turns the
//! parsed arguments into a run: resolve the album or playlist, prepare the
//! destination directory, and feed every track into the download pipeline.
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (argument handling, fatal errors)
//!     ↓
//! Spotify Layer (token, track listing)
//!     ↓
//! Pipeline Layer (queue, retries, progress)
//!     ↓
//! Fetcher Layer (lookup service, files, tags)
//! ```
//!
//! ## Error Handling Philosophy
//!
//! - **Fatal Errors**: Invalid URLs, authentication and resolution failures
//!   abort the run before any track is downloaded
//! - **Track Errors**: Retried, then counted as failures; they never abort
//!   the run and only show up in the final summary
//!
//! ## Progress and User Experience
//!
//! - **Progress Bar**: Settled tracks out of the total, with success and
//!   failure counts
//! - **Track Lines**: One colored line per settled track
//! - **Summary**: Total, successful and failed counts plus a table of the
//!   failed tracks
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify-dl https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy
//! spotify-dl https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M -d /mnt/music
//! spotify-dl --completions zsh
//! ```

mod download;

pub use download::DownloadSummary;
pub use download::build_jobs;
pub use download::download;
pub use download::run;
