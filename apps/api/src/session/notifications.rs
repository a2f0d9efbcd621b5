use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Error,
    Success,
}

impl NotificationKind {
    /// Errors stay visible longer than confirmations.
    fn lifetime(self) -> Duration {
        match self {
            NotificationKind::Error => Duration::seconds(5),
            NotificationKind::Success => Duration::seconds(3),
        }
    }
}

/// A transient, auto-dismissing message for the end user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    fn new(kind: NotificationKind, message: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            created_at: now,
            expires_at: now + kind.lifetime(),
        }
    }

    fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Capability for emitting user-facing notifications.
///
/// Cloned into whatever needs to notify; all clones share one queue. The
/// matching pipeline never notifies directly, it returns typed errors.
#[derive(Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        self.notify_at(kind, message, Utc::now())
    }

    fn notify_at(&self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        let notification = Notification::new(kind, message.into(), now);
        let id = notification.id;
        tracing::debug!("Notification {:?}: {}", kind, notification.message);
        self.queue().push(notification);
        id
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(NotificationKind::Error, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(NotificationKind::Success, message)
    }

    /// Notifications that have not expired yet, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Utc::now())
    }

    fn active_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut queue = self.queue();
        queue.retain(|n| n.is_active(now));
        queue.clone()
    }

    /// Removes one notification early. Returns false if it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut queue = self.queue();
        let before = queue.len();
        queue.retain(|n| n.id != id);
        queue.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_outlive_successes() {
        let notifier = Notifier::new();
        let start = Utc::now();
        notifier.notify_at(NotificationKind::Error, "failed", start);
        notifier.notify_at(NotificationKind::Success, "done", start);

        assert_eq!(notifier.active_at(start).len(), 2);

        let after_success = notifier.active_at(start + Duration::seconds(4));
        assert_eq!(after_success.len(), 1);
        assert_eq!(after_success[0].kind, NotificationKind::Error);

        assert!(notifier.active_at(start + Duration::seconds(5)).is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let notifier = Notifier::new();
        let handle = notifier.clone();
        handle.error("from clone");
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "from clone");
    }

    #[test]
    fn test_dismiss_removes_once() {
        let notifier = Notifier::new();
        let id = notifier.success("Ready for a new analysis!");
        assert!(notifier.dismiss(id));
        assert!(!notifier.dismiss(id));
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_serializes_kind_and_camel_case() {
        let notifier = Notifier::new();
        notifier.error("oops");
        let value = serde_json::to_value(&notifier.active()[0]).unwrap();
        assert_eq!(value["kind"], "error");
        assert!(value.get("expiresAt").is_some());
    }
}
