//! Ephemeral user-facing notifications
//!
//! Notifications are advisory only and carry no state; the session pushes
//! them onto a channel and the embedding frontend displays them however it
//! likes (toasts, status bar, stderr).

use tokio::sync::mpsc;

/// Severity of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One transient user-facing message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Sending half handed to the session
pub type NotificationSender = mpsc::UnboundedSender<Notification>;

/// Receiving half kept by the frontend
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Create a notification channel pair
pub fn channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_level() {
        assert_eq!(Notification::success("ok").level, Level::Success);
        assert_eq!(Notification::error("nope").level, Level::Error);
    }

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (tx, mut rx) = channel();
        tx.send(Notification::error("first")).unwrap();
        tx.send(Notification::success("second")).unwrap();
        assert_eq!(rx.recv().await.unwrap().message, "first");
        assert_eq!(rx.recv().await.unwrap().message, "second");
    }
}
