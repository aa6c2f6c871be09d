//! View orchestration for Skycast
//!
//! The detail and favorites orchestrators consume the weather gateway and
//! favorites registry, assemble display models, and emit user-facing
//! notifications. Rendering itself lives elsewhere.

pub mod detail;
pub mod favorites_view;
pub mod notify;
pub mod theme;

pub use detail::{DetailView, WeatherView};
pub use favorites_view::FavoritesView;
pub use notify::{LogNotifier, Notification, Notifier};
pub use theme::{Subscription, ThemeSignal};
