//! Favorites view orchestrator.
//!
//! Aggregates current weather for every favorite in one batch and handles
//! removal. The batch reloads the registry from storage, so favorites added
//! elsewhere show up on the next refresh.

use std::sync::Arc;

use parking_lot::Mutex;

use skycast_weather::{Favorite, FavoriteConditions, FavoritesRegistry, WeatherGateway};

use crate::notify::{Notification, Notifier};

pub struct FavoritesView {
    gateway: Arc<WeatherGateway>,
    registry: Arc<FavoritesRegistry>,
    notifier: Arc<dyn Notifier>,
    model: Mutex<Vec<FavoriteConditions>>,
}

impl FavoritesView {
    pub fn new(
        gateway: Arc<WeatherGateway>,
        registry: Arc<FavoritesRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            registry,
            notifier,
            model: Mutex::new(Vec::new()),
        }
    }

    /// Rebuild the display model: one entry per favorite in persisted
    /// order, failed lookups carrying null weather.
    pub async fn refresh(&self) -> Vec<FavoriteConditions> {
        let batch = self
            .gateway
            .current_weather_for_all_favorites(&self.registry)
            .await;
        *self.model.lock() = batch.clone();
        batch
    }

    /// Remove a favorite and acknowledge; returns the updated favorites
    /// list without refetching weather.
    pub fn remove(&self, id: &str) -> Vec<Favorite> {
        let updated = self.registry.remove(id);
        self.model.lock().retain(|entry| entry.favorite.id != id);
        self.notifier.notify(Notification::FavoriteRemoved);
        updated
    }

    /// Current display model from the last refresh.
    pub fn model(&self) -> Vec<FavoriteConditions> {
        self.model.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use skycast_weather::{ProviderClient, ResponseCache};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct RecordingNotifier {
        events: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.events.lock().push(notification);
        }
    }

    struct Fixture {
        view: FavoritesView,
        registry: Arc<FavoritesRegistry>,
        notifier: Arc<RecordingNotifier>,
        _dir: tempfile::TempDir,
    }

    fn fixture(server: &MockServer) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let client = ProviderClient::new(&server.uri(), "test_key").unwrap();
        let cache = ResponseCache::open(dir.path().join("responses.db")).unwrap();
        let gateway = Arc::new(WeatherGateway::new(
            client,
            cache,
            Duration::from_secs(60),
        ));
        let registry =
            Arc::new(FavoritesRegistry::open(dir.path().join("favorites.db")).unwrap());
        let notifier = Arc::new(RecordingNotifier {
            events: Mutex::new(Vec::new()),
        });
        let view = FavoritesView::new(gateway, registry.clone(), notifier.clone());
        Fixture {
            view,
            registry,
            notifier,
            _dir: dir,
        }
    }

    async fn mount_location(server: &MockServer, id: &str, temp: f64) {
        let current = format!(
            r#"[{{"EpochTime":1690084800,"Temperature":{{"Metric":{{"Value":{},"Unit":"C"}}}}}}]"#,
            temp
        );
        let day = r#"{"Date":"2026-08-24T07:00:00+03:00","Temperature":{"Minimum":{"Value":24.0,"Unit":"C"},"Maximum":{"Value":31.0,"Unit":"C"}}}"#;
        let forecast = format!(r#"{{"DailyForecasts":[{}]}}"#, vec![day; 5].join(","));

        Mock::given(method("GET"))
            .and(path(format!("/currentconditions/v1/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(current))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/forecasts/v1/daily/5day/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(forecast))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_refresh_builds_model_in_order() {
        let server = MockServer::start().await;
        mount_location(&server, "1", 18.5).await;
        mount_location(&server, "2", 27.0).await;

        let f = fixture(&server);
        f.registry.add("1", "Amsterdam");
        f.registry.add("2", "Cairo");

        let batch = f.view.refresh().await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].favorite.name, "Amsterdam");
        assert_eq!(batch[0].current.as_ref().unwrap().value, 18.5);
        assert_eq!(batch[1].favorite.name, "Cairo");
        assert_eq!(f.view.model().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_with_failing_item() {
        let server = MockServer::start().await;
        mount_location(&server, "1", 18.5).await;
        // "2" unmocked: 404 on both legs

        let f = fixture(&server);
        f.registry.add("1", "Amsterdam");
        f.registry.add("2", "Nowhere");

        let batch = f.view.refresh().await;
        assert_eq!(batch.len(), 2);
        assert!(batch[0].current.is_some());
        assert!(batch[1].current.is_none());
        assert!(batch[1].forecast.is_none());
    }

    #[tokio::test]
    async fn test_remove_updates_model_and_notifies() {
        let server = MockServer::start().await;
        mount_location(&server, "1", 18.5).await;
        mount_location(&server, "2", 27.0).await;

        let f = fixture(&server);
        f.registry.add("1", "Amsterdam");
        f.registry.add("2", "Cairo");
        f.view.refresh().await;

        let updated = f.view.remove("1");
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].name, "Cairo");
        assert_eq!(f.view.model().len(), 1);
        assert!(!f.registry.is_favorite("1"));
        assert_eq!(
            *f.notifier.events.lock(),
            vec![Notification::FavoriteRemoved]
        );
    }

    #[tokio::test]
    async fn test_refresh_with_no_favorites_is_empty() {
        let server = MockServer::start().await;
        let f = fixture(&server);

        let batch = f.view.refresh().await;
        assert!(batch.is_empty());
    }
}
