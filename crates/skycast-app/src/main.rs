use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use skycast_app::{DetailView, LogNotifier, Notifier, ThemeSignal};
use skycast_weather::{FavoritesRegistry, ProviderClient, ResponseCache, WeatherGateway};

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;
    let (config, _validation) = skycast_core::Config::load_validated()?;

    std::fs::create_dir_all(&config.config_dir).context("Failed to create data directory")?;

    let client = ProviderClient::new(&config.provider.base_url, &config.provider.api_key)?;
    let cache = ResponseCache::open(config.config_dir.join("responses.db"))?;
    let max_age = Duration::from_secs(u64::from(config.provider.cache_fresh_minutes) * 60);

    let gateway = Arc::new(WeatherGateway::new(client, cache, max_age));
    let registry = Arc::new(FavoritesRegistry::open(config.config_dir.join("favorites.db"))?);
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    let theme = ThemeSignal::with_initial(config.ui.dark_mode);
    let _theme_sub = theme.subscribe(|dark| {
        tracing::info!("Theme switched to {}", if dark { "dark" } else { "light" });
    });

    let detail = DetailView::new(
        gateway,
        registry,
        notifier,
        config.provider.default_city.clone(),
    );

    match std::env::args().nth(1) {
        Some(city) => detail.search(&city).await,
        None => detail.open(None).await,
    }

    match detail.model() {
        Some(model) => {
            println!("{} ({})", model.location.name, model.location.id);
            println!(
                "  Now: {:.1}°{} / {:.1}°F",
                model.current.value,
                model.current.unit,
                model.current.fahrenheit()
            );
            for day in &model.forecast {
                println!(
                    "  {}: {:.1}° – {:.1}°",
                    day.day_name(),
                    day.temperature.minimum.value,
                    day.temperature.maximum.value
                );
            }
            if model.is_favorite {
                println!("  In favorites");
            }
        }
        None => println!("No weather data available."),
    }

    Ok(())
}
