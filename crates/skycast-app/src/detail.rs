//! Detail/search view orchestrator.
//!
//! Resolves a free-text search or a routed location id to a display model:
//! autocomplete first, then current conditions and forecast joined, then the
//! favorite flag. Each lookup carries a token from a monotonic counter and a
//! result is dropped unless its token is still the latest, so a superseded
//! search is never displayed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use skycast_weather::{
    DailyForecast, FavoritesRegistry, Location, MetricValue, WeatherGateway,
};

use crate::notify::{Notification, Notifier};

/// Display model for the detail view.
#[derive(Debug, Clone)]
pub struct WeatherView {
    pub location: Location,
    pub current: MetricValue,
    pub forecast: Vec<DailyForecast>,
    pub is_favorite: bool,
}

/// Monotonic search tokens; only the latest issued token may publish.
#[derive(Default)]
struct SearchTokens {
    issued: AtomicU64,
}

impl SearchTokens {
    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, token: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == token
    }
}

pub struct DetailView {
    gateway: Arc<WeatherGateway>,
    registry: Arc<FavoritesRegistry>,
    notifier: Arc<dyn Notifier>,
    tokens: SearchTokens,
    model: Mutex<Option<WeatherView>>,
    default_city: String,
}

/// UI-layer guard: searches must be English letters and spaces only.
pub fn is_valid_query(query: &str) -> bool {
    !query.trim().is_empty()
        && query
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ')
}

impl DetailView {
    pub fn new(
        gateway: Arc<WeatherGateway>,
        registry: Arc<FavoritesRegistry>,
        notifier: Arc<dyn Notifier>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            registry,
            notifier,
            tokens: SearchTokens::default(),
            model: Mutex::new(None),
            default_city: default_city.into(),
        }
    }

    /// Handle navigation: a routed location id resolves directly, absence
    /// falls back to searching the default city.
    pub async fn open(&self, location_id: Option<&str>) {
        match location_id {
            Some(id) => self.search_by_id(id).await,
            None => self.search(&self.default_city).await,
        }
    }

    /// Free-text city search. Invalid input is rejected before any gateway
    /// call; an empty autocomplete result leaves the model untouched.
    pub async fn search(&self, query: &str) {
        if !is_valid_query(query) {
            self.notifier.notify(Notification::InvalidSearch);
            return;
        }

        let token = self.tokens.issue();

        let Some(cities) = self.gateway.autocomplete(query).await else {
            return;
        };
        let Some(city) = cities.into_iter().next() else {
            tracing::info!("No location match for '{}'", query);
            return;
        };

        self.finish_lookup(token, city.into()).await;
    }

    /// Lookup by provider location id (deep link from the favorites view).
    pub async fn search_by_id(&self, id: &str) {
        let token = self.tokens.issue();

        let Some(city) = self.gateway.location_details(id).await else {
            return;
        };

        self.finish_lookup(token, city.into()).await;
    }

    async fn finish_lookup(&self, token: u64, location: Location) {
        let Some(joined) = self.gateway.current_and_forecast(&location.id).await else {
            return;
        };

        if !self.tokens.is_latest(token) {
            tracing::debug!("Discarding superseded search for '{}'", location.name);
            return;
        }

        let is_favorite = self.registry.is_favorite(&location.id);
        *self.model.lock() = Some(WeatherView {
            location,
            current: joined.current,
            forecast: joined.forecast,
            is_favorite,
        });
    }

    /// Current display model, if a search has resolved.
    pub fn model(&self) -> Option<WeatherView> {
        self.model.lock().clone()
    }

    /// Add the displayed location to favorites; an existing favorite only
    /// produces an acknowledgement. Removal lives in the favorites view.
    pub fn toggle_favorite(&self) {
        let Some(location) = self.model.lock().as_ref().map(|m| m.location.clone()) else {
            return;
        };

        if self.registry.add(&location.id, &location.name) {
            self.notifier.notify(Notification::FavoriteAdded);
        } else {
            self.notifier.notify(Notification::AlreadyFavorite);
        }

        if let Some(model) = self.model.lock().as_mut() {
            model.is_favorite = self.registry.is_favorite(&location.id);
        }
    }
}
