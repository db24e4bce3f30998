use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::{Error, Result},
    spotify::auth::AuthContext,
    types::{
        Album, AlbumResponse, Paging, Playlist, PlaylistItem, PlaylistResponse, Resource,
        ResourceId, ResourceKind, Track, TrackObject, join_artists,
    },
};

/// Resolves an album or playlist into its complete, ordered track list.
///
/// Issues `GET {api_url}/{albums|playlists}/{id}` with the run's access token
/// and then follows every `next` link of the embedded track listing until
/// the last page, so callers always receive the full list.
///
/// # Arguments
///
/// * `client` - HTTP client shared by the run
/// * `api_url` - Base URL of the Spotify Web API (see [`crate::config::spotify_apiurl`])
/// * `auth` - Run-wide token cache; the token is fetched on first use
/// * `resource` - Kind and id parsed from the input URL
///
/// # Track Mapping
///
/// Album listings contain track objects directly, playlist listings wrap each
/// track in an item. Both normalize to [`Track`], with the contributing
/// artists joined by `", "`. Playlist entries without a track or without a
/// track id (local files, removed tracks) are skipped.
///
/// # Errors
///
/// - [`Error::Auth`] if the access token cannot be obtained
/// - [`Error::Resolution`] on network failures, non-success statuses or
///   payloads that do not match the expected shape
///
/// # Example
///
/// ```
/// let resource = resolve(&client, &config::spotify_apiurl(), &auth, &resource_id).await?;
/// println!("{} tracks", resource.tracks().len());
/// ```
pub async fn resolve(
    client: &Client,
    api_url: &str,
    auth: &AuthContext,
    resource: &ResourceId,
) -> Result<Resource> {
    let token = auth.access_token().await?;
    let api_url = format!(
        "{uri}/{kind}/{id}",
        uri = api_url.trim_end_matches('/'),
        kind = resource.kind.plural(),
        id = resource.id
    );

    match resource.kind {
        ResourceKind::Album => {
            let album: AlbumResponse = get_json(client, &api_url, &token, resource).await?;
            let items = follow_pages(client, &token, resource, album.tracks).await?;

            Ok(Resource::Album(Album {
                id: album.id,
                title: album.name,
                artist: join_artists(&album.artists),
                tracks: items
                    .into_iter()
                    .filter_map(TrackObject::into_track)
                    .collect(),
            }))
        }
        ResourceKind::Playlist => {
            let playlist: PlaylistResponse = get_json(client, &api_url, &token, resource).await?;
            let items = follow_pages(client, &token, resource, playlist.tracks).await?;

            Ok(Resource::Playlist(Playlist {
                id: playlist.id,
                name: playlist.name,
                owner: playlist
                    .owner
                    .display_name
                    .filter(|name| !name.is_empty())
                    .unwrap_or(playlist.owner.id),
                tracks: items
                    .into_iter()
                    .filter_map(|item: PlaylistItem| item.track)
                    .filter_map(TrackObject::into_track)
                    .collect::<Vec<Track>>(),
            }))
        }
    }
}

/// Collects the items of `first` and of every page linked through `next`.
async fn follow_pages<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    resource: &ResourceId,
    first: Paging<T>,
) -> Result<Vec<T>> {
    let mut items = first.items;
    let mut next = first.next;

    while let Some(page_url) = next {
        let page: Paging<T> = get_json(client, &page_url, token, resource).await?;
        items.extend(page.items);
        next = page.next;
    }

    Ok(items)
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    resource: &ResourceId,
) -> Result<T> {
    let resolution_error = |reason: String| Error::Resolution {
        kind: resource.kind,
        id: resource.id.clone(),
        reason,
    };

    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| resolution_error(e.to_string()))?;

    let response = response
        .error_for_status()
        .map_err(|e| resolution_error(e.to_string()))?;

    response
        .json::<T>()
        .await
        .map_err(|e| resolution_error(format!("malformed response: {e}")))
}
