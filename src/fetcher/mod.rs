//! Single-track download: lookup, audio and cover fetch, file write, tagging.
//!
//! The pipeline only knows the [`TrackFetcher`] trait; [`LookupFetcher`] is
//! the implementation backed by the audio lookup service.

pub mod tags;

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
};

use crate::{
    error::TrackError,
    types::{Job, LookupMetadata, LookupResponse},
};

const LOOKUP_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const LOOKUP_ORIGIN: &str = "https://spotifydown.com";
const LOOKUP_REFERER: &str = "https://spotifydown.com/";

/// Downloads one track and leaves a tagged file at [`Job::target_path`].
///
/// Implementations must be safe to call from many tasks at once and must
/// tolerate being called again for the same job after a failure.
#[async_trait]
pub trait TrackFetcher: Send + Sync {
    async fn fetch(&self, job: &Job) -> Result<PathBuf, TrackError>;
}

/// [`TrackFetcher`] backed by the audio lookup service.
///
/// # Pipeline
///
/// 1. `GET {lookup_url}/download/{track_id}` with browser-like headers; the
///    service rejects requests without a plausible origin
/// 2. Audio payload and cover image are downloaded concurrently
/// 3. The audio is written to the job's target path
/// 4. Title, artist, album, front cover and track number are embedded
///
/// Nothing is cleaned up on failure. A retry simply overwrites the file.
#[derive(Clone)]
pub struct LookupFetcher {
    client: Client,
    lookup_url: String,
}

impl LookupFetcher {
    pub fn new(client: Client, lookup_url: impl Into<String>) -> Self {
        let lookup_url: String = lookup_url.into();
        LookupFetcher {
            client,
            lookup_url: lookup_url.trim_end_matches('/').to_string(),
        }
    }

    async fn lookup(&self, track_id: &str) -> Result<(String, LookupMetadata), TrackError> {
        let api_url = format!(
            "{uri}/download/{id}",
            uri = self.lookup_url,
            id = track_id
        );

        let response = self
            .client
            .get(&api_url)
            .headers(lookup_headers())
            .send()
            .await?
            .error_for_status()?;

        let json = response.json::<LookupResponse>().await?;
        if !json.success {
            return Err(TrackError::Fetch(format!(
                "lookup rejected track {track_id}: {}",
                json.message.unwrap_or_else(|| "no reason given".to_string())
            )));
        }

        match (json.link, json.metadata) {
            (Some(link), Some(metadata)) if !link.is_empty() => Ok((link, metadata)),
            (_, None) => Err(TrackError::Fetch(format!(
                "lookup returned no metadata for track {track_id}"
            ))),
            _ => Err(TrackError::Fetch(format!(
                "lookup returned no audio link for track {track_id}"
            ))),
        }
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, TrackError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TrackFetcher for LookupFetcher {
    async fn fetch(&self, job: &Job) -> Result<PathBuf, TrackError> {
        let (link, metadata) = self.lookup(&job.track.id).await?;
        if metadata.cover.is_empty() {
            return Err(TrackError::Fetch(format!(
                "lookup returned no cover for track {}",
                job.track.id
            )));
        }

        let (audio, cover) = tokio::try_join!(
            self.get_bytes(&link),
            self.get_bytes(&metadata.cover)
        )?;

        let path = job.target_path();
        async_fs::write(&path, audio)
            .await
            .map_err(|e| TrackError::Fetch(format!("cannot write {}: {e}", path.display())))?;

        let info = tags::TagInfo {
            title: metadata.title,
            artist: metadata.artists,
            album: metadata.album,
            cover,
            track_number: job.position,
        };
        tags::embed(path.clone(), info).await?;

        Ok(path)
    }
}

fn lookup_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(LOOKUP_USER_AGENT));
    headers.insert(ORIGIN, HeaderValue::from_static(LOOKUP_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(LOOKUP_REFERER));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers
}
