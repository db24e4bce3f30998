use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Album,
    Playlist,
}

impl ResourceKind {
    /// Path segment used in Spotify URLs (`album`, `playlist`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Album => "album",
            ResourceKind::Playlist => "playlist",
        }
    }

    /// Plural form used by the Web API endpoints and the output layout.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Album => "albums",
            ResourceKind::Playlist => "playlists",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "album" => Some(ResourceKind::Album),
            "playlist" => Some(ResourceKind::Playlist),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource reference parsed from a URL, before anything is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Album(Album),
    Playlist(Playlist),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Album(_) => ResourceKind::Album,
            Resource::Playlist(_) => ResourceKind::Playlist,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        match self {
            Resource::Album(album) => &album.tracks,
            Resource::Playlist(playlist) => &playlist.tracks,
        }
    }

    /// `"{artist} - {title}"` for albums, `"{owner} - {name}"` for playlists.
    pub fn display_name(&self) -> String {
        match self {
            Resource::Album(album) => format!("{} - {}", album.artist, album.title),
            Resource::Playlist(playlist) => format!("{} - {}", playlist.owner, playlist.name),
        }
    }
}

/// One unit of work for the download pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub track: Track,
    pub destination: PathBuf,
    pub file_name: String,
    /// 1-based position inside the resource, written as the track number tag.
    pub position: Option<u32>,
}

impl Job {
    pub fn target_path(&self) -> PathBuf {
        self.destination.join(&self.file_name)
    }
}

#[derive(Tabled)]
pub struct FailedTrackRow {
    pub name: String,
    pub artist: String,
    pub id: String,
}

impl From<&Track> for FailedTrackRow {
    fn from(track: &Track) -> Self {
        FailedTrackRow {
            name: track.name.clone(),
            artist: track.artist.clone(),
            id: track.id.clone(),
        }
    }
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymousTokenResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl TrackObject {
    /// Tracks without an id (local files) cannot be looked up and are dropped.
    pub fn into_track(self) -> Option<Track> {
        let id = self.id?;
        Some(Track {
            id,
            name: self.name,
            artist: join_artists(&self.artists),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub tracks: Paging<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    pub owner: PlaylistOwner,
    pub tracks: Paging<PlaylistItem>,
}

// Lookup service payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub success: bool,
    pub metadata: Option<LookupMetadata>,
    pub link: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub cover: String,
}

pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}
