use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use url::Url;

use crate::{
    error::{Error, Result},
    types::{Resource, ResourceId, ResourceKind, Track},
};

pub const RESOURCE_HOST: &str = "open.spotify.com";
pub const OUTPUT_DIR_NAME: &str = "spotify-dl";
pub const AUDIO_EXTENSION: &str = "mp3";

const MAX_FILE_NAME_BYTES: usize = 255;
const ILLEGAL_CHARS: [char; 9] = ['/', '\\', '?', '<', '>', ':', '*', '|', '"'];
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Parses `https://open.spotify.com/{album|playlist}/{id}[...]` into a [`ResourceId`].
///
/// Query strings, fragments and trailing path segments are ignored, as is a
/// leading localisation segment such as `/intl-de`.
pub fn parse_resource_url(input: &str) -> Result<ResourceId> {
    let url = Url::parse(input.trim())
        .map_err(|e| Error::InvalidUrl(format!("{input}: {e}")))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::InvalidUrl(format!(
            "{input}: unsupported scheme {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case(RESOURCE_HOST) => {}
        _ => {
            return Err(Error::InvalidUrl(format!(
                "{input}: host is not {RESOURCE_HOST}"
            )));
        }
    }

    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|segment| !segment.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();
    if segments.first().is_some_and(|s| s.starts_with("intl-")) {
        segments.remove(0);
    }

    let (kind, id) = match segments.as_slice() {
        [kind, id, ..] => (ResourceKind::from_segment(kind), *id),
        _ => (None, ""),
    };

    match kind {
        Some(kind) if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Ok(ResourceId {
                kind,
                id: id.to_string(),
            })
        }
        _ => Err(Error::InvalidUrl(format!(
            "{input}: expected /album/{{id}} or /playlist/{{id}}"
        ))),
    }
}

/// Makes a string safe to use as a single path component.
pub fn sanitize_filename(name: &str) -> String {
    sanitize_with_limit(name, MAX_FILE_NAME_BYTES)
}

fn sanitize_with_limit(name: &str, max_bytes: usize) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<&str>>().join(" ");
    let mut cleaned = collapsed
        .trim_end_matches(['.', ' '])
        .to_string();

    let stem = cleaned.split('.').next().unwrap_or_default();
    let reserved = RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem));

    // room for the '_' prefix of reserved names
    let max_bytes = if reserved { max_bytes - 1 } else { max_bytes };
    if cleaned.len() > max_bytes {
        let mut end = max_bytes;
        while !cleaned.is_char_boundary(end) {
            end -= 1;
        }
        cleaned.truncate(end);
        cleaned = cleaned.trim_end_matches(['.', ' ']).to_string();
    }

    if cleaned.is_empty() {
        return "_".to_string();
    }

    if reserved {
        cleaned.insert(0, '_');
    }

    cleaned
}

/// Output file name for a track: `"{name} - {artist}.mp3"`, sanitized.
pub fn track_file_name(track: &Track) -> String {
    format!("{}.{AUDIO_EXTENSION}", track_stem(track, ""))
}

/// Sanitized `"{name} - {artist}"`, shortened so that `stem + suffix + ".mp3"`
/// fits in a single path component.
fn track_stem(track: &Track, suffix: &str) -> String {
    let limit = MAX_FILE_NAME_BYTES - AUDIO_EXTENSION.len() - 1 - suffix.len();
    sanitize_with_limit(&format!("{} - {}", track.name, track.artist), limit)
}

/// Assigns a file name to every track in resource order.
///
/// Names are unique case-insensitively. A track whose name is already taken,
/// by an earlier track or by an earlier suffixed name, gets the lowest free
/// ` (2)`, ` (3)` and so on.
pub fn assign_file_names(tracks: &[Track]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();

    tracks
        .iter()
        .map(|track| {
            let mut name = track_file_name(track);
            let mut n = 1;
            while taken.contains(&name.to_lowercase()) {
                n += 1;
                let suffix = format!(" ({n})");
                name = format!("{}{suffix}.{AUDIO_EXTENSION}", track_stem(track, &suffix));
            }

            taken.insert(name.to_lowercase());
            name
        })
        .collect()
}

/// `{root}/spotify-dl/{albums|playlists}/{sanitized display name}`
pub fn resource_dir(root: &Path, resource: &Resource) -> PathBuf {
    root.join(OUTPUT_DIR_NAME)
        .join(resource.kind().plural())
        .join(sanitize_filename(&resource.display_name()))
}

pub fn default_destination_root() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolves the `--destination` flag, falling back to the downloads folder.
pub fn resolve_destination(destination: Option<PathBuf>) -> io::Result<PathBuf> {
    match destination {
        Some(path) => std::path::absolute(path),
        None => Ok(default_destination_root()),
    }
}
