//! Configuration management for spotify-dl.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a built-in default, so the tool
//! works without any configuration at all; the environment only overrides
//! upstream endpoints and pipeline tuning.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str =
    "https://open.spotify.com/get_access_token?reason=transport&productType=web_player";
pub const DEFAULT_LOOKUP_URL: &str = "https://api.spotifydown.com";
pub const DEFAULT_CONCURRENCY: usize = 25;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `spotify-dl/.env` in the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/spotify-dl/.env`
/// - macOS: `~/Library/Application Support/spotify-dl/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-dl/.env`
///
/// A missing file is not an error. Variables already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-dl/.env");
    path
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the endpoint issuing anonymous access tokens (`SPOTIFY_API_TOKEN_URL`).
///
/// The endpoint requires no credentials and answers with a JSON object
/// carrying an `accessToken` field.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_TOKEN_URL.to_string())
}

/// Returns the base URL of the audio lookup service (`SPOTIFY_DL_LOOKUP_URL`).
///
/// Requests are issued as `GET {lookup_url}/download/{track_id}`.
pub fn lookup_url() -> String {
    env::var("SPOTIFY_DL_LOOKUP_URL").unwrap_or_else(|_| DEFAULT_LOOKUP_URL.to_string())
}

/// Returns the number of tracks downloaded at the same time (`SPOTIFY_DL_CONCURRENCY`).
pub fn concurrency() -> usize {
    parse_var("SPOTIFY_DL_CONCURRENCY", DEFAULT_CONCURRENCY).max(1)
}

/// Returns the number of attempts per track (`SPOTIFY_DL_MAX_ATTEMPTS`).
pub fn max_attempts() -> u32 {
    parse_var("SPOTIFY_DL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS).max(1)
}

/// Returns the fixed pause between two attempts (`SPOTIFY_DL_RETRY_DELAY_MS`).
pub fn retry_delay() -> Duration {
    Duration::from_millis(parse_var(
        "SPOTIFY_DL_RETRY_DELAY_MS",
        DEFAULT_RETRY_DELAY_MS,
    ))
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Runtime settings for one download run.
///
/// Built once at start-up and passed down explicitly, so tests can point the
/// pipeline at local mock servers without touching the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub lookup_url: String,
    pub concurrency: usize,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            spotify_api_url: spotify_apiurl(),
            spotify_token_url: spotify_apitoken_url(),
            lookup_url: lookup_url(),
            concurrency: concurrency(),
            max_attempts: max_attempts(),
            retry_delay: retry_delay(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}
