//! Cache-first facade over the provider endpoints.
//!
//! Every lookup computes its cache key from the request signature and serves
//! a fresh cached body without touching the network, including a cached
//! failure. Transport and HTTP errors never escape: they are logged, cached
//! as a null body, and surfaced to callers as an absent value.

use futures::future::join_all;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::cache::ResponseCache;
use crate::client::ProviderClient;
use crate::favorites::FavoritesRegistry;
use crate::types::{
    current_metric, City, CurrentAndForecast, FavoriteConditions, ForecastResponse, Observation,
};

pub struct WeatherGateway {
    client: ProviderClient,
    cache: Mutex<ResponseCache>,
    max_age: Duration,
}

impl WeatherGateway {
    pub fn new(client: ProviderClient, cache: ResponseCache, max_age: Duration) -> Self {
        Self {
            client,
            cache: Mutex::new(cache),
            max_age,
        }
    }

    /// City autocomplete for a free-text query. The caller is responsible
    /// for input validation; this passes the query through as-is.
    pub async fn autocomplete(&self, query: &str) -> Option<Vec<City>> {
        let path = "/locations/v1/cities/autocomplete";
        let body = self.fetch_cached(path, &[("q", query)]).await?;
        parse(path, &body)
    }

    /// Location details for a provider location id.
    pub async fn location_details(&self, id: &str) -> Option<City> {
        let path = format!("/locations/v1/cities/{}", id);
        let body = self.fetch_cached(&path, &[]).await?;
        parse(&path, &body)
    }

    /// Current conditions for a location id.
    pub async fn current_conditions(&self, id: &str) -> Option<Vec<Observation>> {
        let path = format!("/currentconditions/v1/{}", id);
        let body = self.fetch_cached(&path, &[]).await?;
        parse(&path, &body)
    }

    /// 5-day forecast for a location id, today first.
    pub async fn forecast(&self, id: &str) -> Option<ForecastResponse> {
        let path = format!("/forecasts/v1/daily/5day/{}", id);
        let body = self.fetch_cached(&path, &[]).await?;
        parse(&path, &body)
    }

    /// Current conditions and forecast, fetched concurrently and joined.
    /// Yields `None` when either leg fails.
    pub async fn current_and_forecast(&self, id: &str) -> Option<CurrentAndForecast> {
        let (current, forecast) = tokio::join!(self.current_conditions(id), self.forecast(id));

        let current = current_metric(&current?)?;
        let forecast = forecast?.daily_forecasts;
        Some(CurrentAndForecast { current, forecast })
    }

    /// Weather for every favorite, in persisted order. The registry is
    /// reloaded from storage first; a failed per-item lookup substitutes
    /// null weather instead of failing the batch.
    pub async fn current_weather_for_all_favorites(
        &self,
        registry: &FavoritesRegistry,
    ) -> Vec<FavoriteConditions> {
        registry.reload();
        let favorites = registry.all();

        let lookups = favorites.into_iter().map(|favorite| async move {
            match self.current_and_forecast(&favorite.id).await {
                Some(joined) => FavoriteConditions {
                    favorite,
                    current: Some(joined.current),
                    forecast: Some(joined.forecast),
                },
                None => FavoriteConditions {
                    favorite,
                    current: None,
                    forecast: None,
                },
            }
        });

        join_all(lookups).await
    }

    /// Cache-first fetch of a raw response body. `None` means the lookup
    /// failed, now or on a previous cached attempt.
    async fn fetch_cached(&self, path: &str, params: &[(&str, &str)]) -> Option<String> {
        let key = self.client.request_signature(path, params);

        match self.cache.lock().get_fresh(&key, self.max_age) {
            Ok(Some(hit)) => {
                tracing::debug!("Cache hit for {}", path);
                return hit.body;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Cache lookup failed for {}: {}", path, e);
            }
        }

        match self.client.get(path, params).await {
            Ok(body) => {
                if let Err(e) = self.cache.lock().store(&key, Some(&body)) {
                    tracing::warn!("Failed to cache response for {}: {}", path, e);
                }
                Some(body)
            }
            Err(e) => {
                tracing::error!("API error for {}: {}", path, e);
                if let Err(e) = self.cache.lock().store(&key, None) {
                    tracing::warn!("Failed to cache failure for {}: {}", path, e);
                }
                None
            }
        }
    }

    /// Backdate a cached entry (test hook for expiry paths).
    #[cfg(test)]
    #[allow(clippy::unwrap_used)]
    fn backdate(&self, path: &str, params: &[(&str, &str)], age: Duration) {
        let key = self.client.request_signature(path, params);
        self.cache.lock().backdate(&key, age).unwrap();
    }
}

fn parse<T: DeserializeOwned>(path: &str, body: &str) -> Option<T> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Failed to parse response for {}: {}", path, e);
            None
        }
    }
}
