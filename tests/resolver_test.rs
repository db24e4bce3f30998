mod common;

use reqwest::Client;
use serde_json::json;
use spotify_dl::error::Error;
use spotify_dl::spotify::{AuthContext, resolve};
use spotify_dl::types::{Resource, ResourceId, ResourceKind};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TOKEN, mount_token, settings_for, track_json};

fn resource_id(kind: ResourceKind, id: &str) -> ResourceId {
    ResourceId {
        kind,
        id: id.to_string(),
    }
}

#[tokio::test]
async fn test_resolve_album_follows_pagination() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/alb1"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "alb1",
            "name": "First Album",
            "artists": [{ "name": "Artist A" }, { "name": "Artist B" }],
            "tracks": {
                "items": [
                    track_json("t1", "One", &["Artist A"]),
                    track_json("t2", "Two", &["Artist A", "Guest"]),
                ],
                "next": format!("{}/v1/albums/alb1/tracks?offset=2&limit=2", server.uri())
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/alb1/tracks"))
        .and(query_param("offset", "2"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                track_json("t3", "Three", &["Artist B"]),
                track_json("t4", "Four", &["Artist A"]),
            ],
            "next": format!("{}/v1/albums/alb1/tracks?offset=4&limit=2", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/alb1/tracks"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [track_json("t5", "Five", &[])],
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    let resource = resolve(
        &client,
        &settings.spotify_api_url,
        &auth,
        &resource_id(ResourceKind::Album, "alb1"),
    )
    .await
    .unwrap();

    let Resource::Album(album) = &resource else {
        panic!("expected an album, got {resource:?}");
    };
    assert_eq!(album.title, "First Album");
    assert_eq!(album.artist, "Artist A, Artist B");
    assert_eq!(resource.display_name(), "Artist A, Artist B - First Album");

    // Sum of all pages, in cross-page order
    let ids: Vec<&str> = album.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3", "t4", "t5"]);
    assert_eq!(album.tracks[1].artist, "Artist A, Guest");
    assert_eq!(album.tracks[4].artist, "");
}

#[tokio::test]
async fn test_resolve_playlist_unwraps_items_and_skips_local_tracks() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pl1",
            "name": "Road Trip",
            "owner": { "id": "owner-id", "display_name": "Owner Name" },
            "tracks": {
                "items": [
                    { "track": track_json("t1", "One", &["Artist A"]) },
                    { "track": null },
                    { "track": { "id": null, "name": "Local File", "artists": [] } },
                ],
                "next": format!("{}/v1/playlists/pl1/tracks?offset=3", server.uri())
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "track": track_json("t2", "Two", &["Artist B", "Artist C"]) }],
            "next": null
        })))
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    let resource = resolve(
        &client,
        &settings.spotify_api_url,
        &auth,
        &resource_id(ResourceKind::Playlist, "pl1"),
    )
    .await
    .unwrap();

    let Resource::Playlist(playlist) = &resource else {
        panic!("expected a playlist, got {resource:?}");
    };
    assert_eq!(playlist.name, "Road Trip");
    assert_eq!(playlist.owner, "Owner Name");
    assert_eq!(playlist.tracks.len(), 2);
    assert_eq!(playlist.tracks[1].artist, "Artist B, Artist C");
}

#[tokio::test]
async fn test_token_is_fetched_once_per_context() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/alb1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "alb1",
            "name": "Album",
            "artists": [{ "name": "Artist" }],
            "tracks": { "items": [track_json("t1", "One", &["Artist"])], "next": null }
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    assert!(!auth.is_initialized());

    let id = resource_id(ResourceKind::Album, "alb1");
    let (a, b) = tokio::join!(
        resolve(&client, &settings.spotify_api_url, &auth, &id),
        resolve(&client, &settings.spotify_api_url, &auth, &id),
    );
    assert!(a.is_ok() && b.is_ok());
    resolve(&client, &settings.spotify_api_url, &auth, &id)
        .await
        .unwrap();

    assert!(auth.is_initialized());
    // `mount_token` expects exactly one hit, verified when the server drops
}

#[tokio::test]
async fn test_missing_token_is_auth_error() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isAnonymous": true })))
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    let result = resolve(
        &client,
        &settings.spotify_api_url,
        &auth,
        &resource_id(ResourceKind::Album, "alb1"),
    )
    .await;

    assert!(matches!(result, Err(Error::Auth(_))));
    assert!(!auth.is_initialized());
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_auth_error() {
    let client = Client::new();
    let auth = AuthContext::new(client.clone(), "http://127.0.0.1:1/token");

    let result = auth.access_token().await;
    assert!(matches!(result, Err(Error::Auth(_))));
}

#[tokio::test]
async fn test_not_found_is_resolution_error() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/playlists/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    let result = resolve(
        &client,
        &settings.spotify_api_url,
        &auth,
        &resource_id(ResourceKind::Playlist, "missing"),
    )
    .await;

    match result {
        Err(Error::Resolution { kind, id, .. }) => {
            assert_eq!(kind, ResourceKind::Playlist);
            assert_eq!(id, "missing");
        }
        other => panic!("expected resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_resolution_error() {
    let server = MockServer::start().await;
    let settings = settings_for(&server);
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/alb1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = Client::new();
    let auth = AuthContext::new(client.clone(), settings.spotify_token_url.clone());
    let result = resolve(
        &client,
        &settings.spotify_api_url,
        &auth,
        &resource_id(ResourceKind::Album, "alb1"),
    )
    .await;

    assert!(matches!(result, Err(Error::Resolution { .. })));
}
