//! Transient user-facing notifications ("toasts").
//!
//! Any component that needs to tell the visitor something short-lived gets
//! a [`ToastBus`] handed to it and publishes through it. The API streams
//! every published toast to connected browsers as server-sent events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Buffer capacity for the toast channel. Toasts are ephemeral, so a small
/// buffer is enough; laggards simply miss old ones.
const TOAST_CAPACITY: usize = 64;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl ToastKind {
    /// Heading shown above the message.
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Info => "Info",
            Self::Warning => "Warning",
        }
    }

    /// Visual treatment; only errors are rendered as destructive.
    pub fn variant(self) -> ToastVariant {
        match self {
            Self::Error => ToastVariant::Destructive,
            Self::Success | Self::Info | Self::Warning => ToastVariant::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub timestamp: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: message.into(),
            variant: kind.variant(),
            timestamp: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }
}

/// Fan-out channel for [`Toast`]s.
pub struct ToastBus {
    sender: broadcast::Sender<Toast>,
}

impl ToastBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(TOAST_CAPACITY);
        Self { sender }
    }

    /// Show `message` with the given severity.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        self.publish(Toast::new(kind, message));
    }

    /// Publish a prepared toast. Dropped silently when nobody listens.
    pub fn publish(&self, toast: Toast) {
        tracing::debug!(kind = ?toast.kind, description = %toast.description, "Toast published");
        let _ = self.sender.send(toast);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_and_variants_follow_kind() {
        assert_eq!(Toast::success("ok").title, "Success");
        assert_eq!(Toast::success("ok").variant, ToastVariant::Default);
        assert_eq!(Toast::error("boom").variant, ToastVariant::Destructive);
        assert_eq!(Toast::new(ToastKind::Warning, "hmm").title, "Warning");
        assert_eq!(ToastKind::default(), ToastKind::Info);
    }

    #[tokio::test]
    async fn show_reaches_subscribers() {
        let bus = ToastBus::new();
        let mut rx = bus.subscribe();

        bus.show("Form submitted successfully", ToastKind::Success);

        let toast = rx.recv().await.expect("should receive the toast");
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.description, "Form submitted successfully");
    }

    #[test]
    fn show_without_subscribers_is_fine() {
        ToastBus::default().show("nobody is listening", ToastKind::Info);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_value(Toast::error("x")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["variant"], "destructive");
    }
}
