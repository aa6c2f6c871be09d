//! User-facing acknowledgement messages.
//!
//! Fire-and-forget: orchestrators emit a [`Notification`] and move on. The
//! UI collaborator decides how to present it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    FavoriteAdded,
    FavoriteRemoved,
    AlreadyFavorite,
    InvalidSearch,
}

impl Notification {
    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::FavoriteAdded => "Added to favorites.",
            Self::FavoriteRemoved => "Removed from favorites.",
            Self::AlreadyFavorite => "This city is already in your favorites.",
            Self::InvalidSearch => "Invalid search query. Please use English letters only.",
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default notifier that writes acknowledgements to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!("{}", notification.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_non_empty() {
        let all = [
            Notification::FavoriteAdded,
            Notification::FavoriteRemoved,
            Notification::AlreadyFavorite,
            Notification::InvalidSearch,
        ];
        for n in all {
            assert!(!n.message().is_empty());
        }
    }

    #[test]
    fn test_invalid_search_message_mentions_letters() {
        assert!(Notification::InvalidSearch.message().contains("letters"));
    }
}
