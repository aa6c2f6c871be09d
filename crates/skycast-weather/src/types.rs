//! Provider API types and local data structures.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A resolved location: opaque provider key plus display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// City entry returned by autocomplete and location-details endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct City {
    pub key: String,
    pub localized_name: String,
}

impl From<City> for Location {
    fn from(city: City) -> Self {
        Self {
            id: city.key,
            name: city.localized_name,
        }
    }
}

/// One current-conditions observation. The endpoint returns an array;
/// only the first entry is displayed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Observation {
    pub epoch_time: i64,
    pub temperature: Temperature,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    pub metric: MetricValue,
}

/// A temperature reading in metric (Celsius-equivalent) units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    pub value: f64,
    pub unit: String,
}

impl MetricValue {
    /// Convert the metric reading to Fahrenheit for display.
    pub fn fahrenheit(&self) -> f64 {
        (self.value * 9.0) / 5.0 + 32.0
    }
}

/// Take the displayed temperature out of a current-conditions response.
pub fn current_metric(observations: &[Observation]) -> Option<MetricValue> {
    observations.first().map(|o| o.temperature.metric.clone())
}

/// 5-day forecast response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastResponse {
    pub daily_forecasts: Vec<DailyForecast>,
}

/// One forecast day: date plus temperature range. Ordered today-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecast {
    pub date: DateTime<FixedOffset>,
    pub temperature: TemperatureRange,
}

impl DailyForecast {
    /// Weekday display name for the forecast date ("Monday", ...).
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub minimum: UnitValue,
    pub maximum: UnitValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitValue {
    pub value: f64,
    pub unit: String,
}

/// A favorite location as persisted in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
}

/// Joined current conditions and forecast for one location.
#[derive(Debug, Clone)]
pub struct CurrentAndForecast {
    pub current: MetricValue,
    pub forecast: Vec<DailyForecast>,
}

/// Batch result entry for one favorite. Weather fields are `None` when
/// the per-item lookup failed; the rest of the batch is unaffected.
#[derive(Debug, Clone)]
pub struct FavoriteConditions {
    pub favorite: Favorite,
    pub current: Option<MetricValue>,
    pub forecast: Option<Vec<DailyForecast>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_city_parsing() {
        let json = r#"[
            {"Key": "215854", "LocalizedName": "Tel Aviv"},
            {"Key": "328328", "LocalizedName": "London"}
        ]"#;

        let cities: Vec<City> = serde_json::from_str(json).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].key, "215854");
        assert_eq!(cities[0].localized_name, "Tel Aviv");

        let location: Location = cities[0].clone().into();
        assert_eq!(location.id, "215854");
        assert_eq!(location.name, "Tel Aviv");
    }

    #[test]
    fn test_current_conditions_parsing() {
        let json = r#"[{
            "EpochTime": 1690084800,
            "Temperature": {
                "Metric": {"Value": 22.0, "Unit": "C"},
                "Imperial": {"Value": 71.6, "Unit": "F"}
            }
        }]"#;

        let observations: Vec<Observation> = serde_json::from_str(json).unwrap();
        let metric = current_metric(&observations).unwrap();
        assert_eq!(metric.value, 22.0);
        assert_eq!(metric.unit, "C");
    }

    #[test]
    fn test_current_metric_empty_observations() {
        assert!(current_metric(&[]).is_none());
    }

    #[test]
    fn test_forecast_parsing() {
        let json = r#"{
            "Headline": {"Text": "Sunny"},
            "DailyForecasts": [
                {
                    "Date": "2026-08-24T07:00:00+03:00",
                    "Temperature": {
                        "Minimum": {"Value": 24.1, "Unit": "C"},
                        "Maximum": {"Value": 31.3, "Unit": "C"}
                    }
                },
                {
                    "Date": "2026-08-25T07:00:00+03:00",
                    "Temperature": {
                        "Minimum": {"Value": 23.8, "Unit": "C"},
                        "Maximum": {"Value": 30.9, "Unit": "C"}
                    }
                }
            ]
        }"#;

        let forecast: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.daily_forecasts.len(), 2);
        assert_eq!(forecast.daily_forecasts[0].temperature.maximum.value, 31.3);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let metric = MetricValue {
            value: 22.0,
            unit: "C".to_string(),
        };
        assert!((metric.fahrenheit() - 71.6).abs() < 1e-9);

        let freezing = MetricValue {
            value: 0.0,
            unit: "C".to_string(),
        };
        assert_eq!(freezing.fahrenheit(), 32.0);
    }

    #[test]
    fn test_forecast_day_name() {
        let json = r#"{
            "Date": "2026-08-24T07:00:00+03:00",
            "Temperature": {
                "Minimum": {"Value": 20.0, "Unit": "C"},
                "Maximum": {"Value": 30.0, "Unit": "C"}
            }
        }"#;

        let day: DailyForecast = serde_json::from_str(json).unwrap();
        // 2026-08-24 is a Monday
        assert_eq!(day.day_name(), "Monday");
    }
}
