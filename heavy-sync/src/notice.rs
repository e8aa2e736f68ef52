//! User-facing notices emitted when mutations settle.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Notice severity; each has its own display lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// How long a presentation layer should keep the notice on screen.
    pub fn lifetime(&self) -> Duration {
        match self {
            Severity::Success | Severity::Info => Duration::from_secs(3),
            Severity::Warning => Duration::from_secs(4),
            Severity::Error => Duration::from_secs(5),
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// Resource the notice is about (`fabricantes`).
    pub resource: &'static str,
}

impl Notice {
    pub fn new(severity: Severity, resource: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            resource,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.severity.lifetime()
    }
}

/// Fan-out channel shared by every resource engine.
///
/// Sending never blocks. Subscribers that fall behind lose the oldest
/// notices; notices sent with no subscriber are dropped.
#[derive(Debug, Clone)]
pub struct Notices {
    tx: broadcast::Sender<Notice>,
}

impl Notices {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn send(&self, notice: Notice) {
        trace!("Notice [{:?}] {}", notice.severity, notice.message);
        let _ = self.tx.send(notice);
    }

    pub fn success(&self, resource: &'static str, message: impl Into<String>) {
        self.send(Notice::new(Severity::Success, resource, message));
    }

    pub fn error(&self, resource: &'static str, message: impl Into<String>) {
        self.send(Notice::new(Severity::Error, resource, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetimes() {
        assert_eq!(Severity::Success.lifetime(), Duration::from_secs(3));
        assert_eq!(Severity::Info.lifetime(), Duration::from_secs(3));
        assert_eq!(Severity::Warning.lifetime(), Duration::from_secs(4));
        assert_eq!(Severity::Error.lifetime(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn subscribers_receive_in_order() {
        let notices = Notices::new(8);
        let mut rx = notices.subscribe();
        notices.success("fabricantes", "manufacturer created");
        notices.error("fabricantes", "failed to delete manufacturer");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.severity, Severity::Success);
        assert_eq!(first.message, "manufacturer created");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.severity, Severity::Error);
    }

    #[test]
    fn send_without_subscribers_is_silent() {
        let notices = Notices::new(1);
        notices.success("trms", "exchange rate created");
    }
}
