use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use reqwest::Client;

use crate::{
    config::Settings,
    error, error::Result,
    fetcher::{LookupFetcher, TrackFetcher},
    info,
    pipeline::{self, DownloadStatus, ProgressTracker, RetryPolicy, WorkQueue},
    spotify::{self, AuthContext},
    success,
    types::{Job, Resource, Track},
    utils, warning,
};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct DownloadSummary {
    pub resource: Resource,
    pub directory: PathBuf,
    pub status: DownloadStatus,
}

/// Entry point of the binary: downloads `url` and exits on fatal errors.
pub async fn download(url: String, destination: Option<PathBuf>) {
    let root = match utils::resolve_destination(destination) {
        Ok(root) => root,
        Err(e) => error!("Cannot resolve destination directory: {}", e),
    };

    let settings = Settings::from_env();
    match run(&settings, &url, &root).await {
        Ok(summary) => {
            if summary.status.failures.is_empty() {
                success!("Files saved to {}", summary.directory.display());
            } else {
                info!("Files saved to {}", summary.directory.display());
            }
        }
        Err(e) => error!("{}", e),
    }
}

/// Resolves `url` and downloads every track below `destination_root`.
///
/// The run goes through these stages:
/// 1. **URL Parsing**: Invalid input fails before any network request
/// 2. **Resolution**: The access token is fetched once and the full track
///    list is loaded, following pagination
/// 3. **Layout**: `{root}/spotify-dl/{albums|playlists}/{artist|owner} - {title|name}`
///    is created
/// 4. **Download**: Tracks go through the bounded, retrying pipeline
///
/// # Errors
///
/// Only fatal errors are returned: invalid URL, authentication, resolution,
/// or failure to create the destination directory. Failed tracks are
/// reported in [`DownloadSummary::status`].
pub async fn run(settings: &Settings, url: &str, destination_root: &Path) -> Result<DownloadSummary> {
    let resource_id = utils::parse_resource_url(url)?;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());

    info!("Resolving {} {}", resource_id.kind, resource_id.id);
    let resource = spotify::resolve(&client, &settings.spotify_api_url, &auth, &resource_id).await?;

    let directory = utils::resource_dir(destination_root, &resource);
    async_fs::create_dir_all(&directory).await?;

    let tracks = resource.tracks();
    if tracks.is_empty() {
        warning!(
            "{} \"{}\" contains no downloadable tracks",
            resource.kind(),
            resource.display_name()
        );
    } else {
        info!(
            "Downloading {} tracks of {} \"{}\"",
            tracks.len(),
            resource.kind(),
            resource.display_name()
        );
    }

    let jobs = build_jobs(tracks, &directory);
    let fetcher: Arc<dyn TrackFetcher> =
        Arc::new(LookupFetcher::new(client, settings.lookup_url.clone()));
    let tracker = Arc::new(ProgressTracker::new(jobs.len()));

    let status = pipeline::run_jobs(
        jobs,
        fetcher,
        &WorkQueue::new(settings.concurrency),
        RetryPolicy::new(settings.max_attempts, settings.retry_delay),
        tracker,
    )
    .await;

    Ok(DownloadSummary {
        resource,
        directory,
        status,
    })
}

/// One job per track, numbered from 1 in resource order.
pub fn build_jobs(tracks: &[Track], directory: &Path) -> Vec<Job> {
    tracks
        .iter()
        .zip(utils::assign_file_names(tracks))
        .enumerate()
        .map(|(index, (track, file_name))| Job {
            track: track.clone(),
            destination: directory.to_path_buf(),
            file_name,
            position: Some(index as u32 + 1),
        })
        .collect()
}
