//! Genius API access - the sole source of artist, song and producer data.
//!
//! # Architecture
//!
//! Same layering for every request:
//! - **DTOs** (`dto.rs`) - Exact API response shapes
//! - **Domain** (`domain.rs`) - Our types, independent of the API
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Transport** (`transport.rs`, `traits.rs`) - One classified HTTP call
//! - **Retry** (`retry.rs`) - Bounded retry with per-class backoff
//! - **Client** (`client.rs`) - Cache-first fetchers and pagination
//!
//! # Usage
//!
//! ```ignore
//! let transport = Arc::new(HttpTransport::new(DEFAULT_BASE_URL, token, timeout, timers.clone()));
//! let client = GeniusClient::new(transport, RetryPolicy::default(), Pagination::default(), caches, timers);
//!
//! let artists = client.search_artist("Metro Boomin").await?;
//! let songs = client.all_artist_songs(artists[0].id).await?;
//! ```

pub mod adapter;
pub mod client;
pub mod domain;
pub mod dto;
pub mod retry;
pub mod traits;
pub mod transport;

pub use client::{GeniusClient, Pagination};
pub use domain::{Artist, CreditGroup, GeniusError, Song};
pub use retry::RetryPolicy;
pub use traits::{GeniusTransport, Outcome};
pub use transport::{DEFAULT_BASE_URL, HttpTransport};
