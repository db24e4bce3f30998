#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use spotify_dl::config::Settings;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

pub const TOKEN: &str = "test-access-token";
pub const AUDIO_BYTES: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00, 0x4C, 0x41];
pub const COVER_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        spotify_api_url: format!("{}/v1", server.uri()),
        spotify_token_url: format!("{}/token", server.uri()),
        lookup_url: server.uri(),
        concurrency: 25,
        max_attempts: 5,
        retry_delay: Duration::from_millis(10),
    }
}

pub fn track_json(id: &str, name: &str, artists: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
    })
}

/// Token endpoint that must be hit exactly once.
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clientId": "client",
            "accessToken": TOKEN,
            "accessTokenExpirationTimestampMs": 4102444800000u64,
            "isAnonymous": true
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub fn lookup_body(server: &MockServer, id: &str, title: &str, artists: &str, album: &str) -> Value {
    json!({
        "success": true,
        "metadata": {
            "id": id,
            "title": title,
            "artists": artists,
            "album": album,
            "cover": format!("{}/covers/{id}.jpg", server.uri()),
            "releaseDate": "2020-01-01"
        },
        "link": format!("{}/audio/{id}.mp3", server.uri())
    })
}

/// Lookup, audio and cover endpoints for a track that downloads fine.
pub async fn mount_track(server: &MockServer, id: &str, title: &str, artists: &str, album: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{id}")))
        .and(header("origin", "https://spotifydown.com"))
        .and(header("referer", "https://spotifydown.com/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(lookup_body(server, id, title, artists, album)),
        )
        .mount(server)
        .await;

    mount_media(server, id).await;
}

pub async fn mount_media(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/audio/{id}.mp3")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO_BYTES))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/covers/{id}.jpg")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(COVER_BYTES))
        .mount(server)
        .await;
}
