//! Spotify Album & Playlist Downloader Library
//!
//! This library resolves a Spotify album or playlist into its track list and
//! downloads every track through an audio lookup service, writing tagged MP3
//! files to disk. Downloads run through a bounded worker pool with per-track
//! retries while a shared progress display aggregates the outcomes.
//!
//! # Modules
//!
//! - `cli` - Run driver used by the binary
//! - `config` - Configuration management and environment variables
//! - `error` - Fatal and per-track error types
//! - `fetcher` - Single-track download and tagging
//! - `pipeline` - Work queue, retry policy and progress aggregation
//! - `spotify` - Spotify Web API client (token, albums, playlists)
//! - `types` - Data structures and type definitions
//! - `utils` - URL parsing, file naming and destination paths
//!
//! # Example
//!
//! ```
//! use spotify_dl::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> spotify_dl::error::Result<()> {
//!     let settings = config::Settings::from_env();
//!     let root = spotify_dl::utils::default_destination_root();
//!     cli::run(&settings, "https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy", &root).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Resolving album {}", id);
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Destination directory created");
/// success!("Downloaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to resolve playlist");
/// error!("Invalid url: {}", url);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Playlist contains no downloadable tracks");
/// warning!("Cannot load .env file: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a failure message with a red cross without exiting.
///
/// Used for per-track failures that are reported but do not stop the run.
///
/// # Example
///
/// ```
/// failure!("{} failed after {} attempts", track.name, attempts);
/// ```
#[macro_export]
macro_rules! failure {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✗".red().bold(), std::format_args!($($arg)*));
  })
}
