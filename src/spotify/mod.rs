//! # Spotify Integration Module
//!
//! This module is the integration layer between spotify-dl and the Spotify
//! Web API. It only reads public catalogue data, so no user authorization is
//! involved: an anonymous access token is obtained once per run and used for
//! every listing request.
//!
//! ## Architecture
//!
//! ```text
//! Run driver (cli)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (anonymous token, cached per run)
//!     └── Resource resolution (albums, playlists, pagination)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Provides [`auth::AuthContext`]:
//! - **Lazy Fetch**: The token is requested on first use only
//! - **Run Scope**: The context is created by the run driver and passed by
//!   reference; there is no global token state
//! - **No Refresh**: A run assumes the token stays valid until it ends
//!
//! ### Resource Module
//!
//! [`resource`] - Turns an album or playlist id into a [`crate::types::Resource`]:
//! - **Pagination**: Follows `next` links until the listing is complete
//! - **Normalization**: Flat album tracks and wrapped playlist items map to the
//!   same [`crate::types::Track`] shape
//!
//! ## API Coverage
//!
//! - `GET /albums/{id}` - Album metadata with the first page of tracks
//! - `GET /playlists/{id}` - Playlist metadata with the first page of items
//! - `GET {next}` - Follow-up pages of either listing
//!
//! ## Error Types
//!
//! All functions return [`crate::error::Result`]:
//! - **`Error::Auth`** - The token endpoint failed or returned no token
//! - **`Error::Resolution`** - Listing requests failed or returned malformed data

pub mod auth;
pub mod resource;

pub use auth::AuthContext;
pub use resource::resolve;
