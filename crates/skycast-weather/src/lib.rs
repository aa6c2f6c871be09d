//! Weather data access for Skycast
//!
//! Wraps the upstream provider's city autocomplete, current conditions and
//! 5-day forecast endpoints behind a cache-first gateway, and manages the
//! persisted favorites list.

pub mod cache;
pub mod client;
pub mod error;
pub mod favorites;
pub mod gateway;
pub mod types;

pub use cache::ResponseCache;
pub use client::ProviderClient;
pub use error::WeatherError;
pub use favorites::FavoritesRegistry;
pub use gateway::WeatherGateway;
pub use types::*;
