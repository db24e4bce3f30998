use std::path::PathBuf;

use id3::{
    Tag, TagLike, Version,
    frame::{Picture, PictureType},
};

use crate::error::TrackError;

pub const COVER_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct TagInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: Vec<u8>,
    pub track_number: Option<u32>,
}

/// Writes an ID3v2.4 tag into the file at `path`.
///
/// Runs on the blocking pool because `id3` rewrites the file synchronously.
pub async fn embed(path: PathBuf, info: TagInfo) -> Result<(), TrackError> {
    tokio::task::spawn_blocking(move || write_tag(&path, info))
        .await
        .map_err(|e| TrackError::Tag(e.to_string()))?
}

fn write_tag(path: &std::path::Path, info: TagInfo) -> Result<(), TrackError> {
    let mut tag = Tag::new();

    tag.set_title(info.title);
    tag.set_artist(info.artist);
    tag.set_album(info.album);
    if let Some(number) = info.track_number {
        tag.set_track(number);
    }

    tag.add_frame(Picture {
        mime_type: COVER_MIME_TYPE.to_string(),
        picture_type: PictureType::CoverFront,
        description: "Cover".to_string(),
        data: info.cover,
    });

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}
