//! Notification sinks.

use tokio::sync::mpsc;

use crate::models::{Notification, Severity};

/// Fire-and-forget delivery of user notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to a channel drained by the UI's toast layer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        if let Err(err) = self.tx.send(notification) {
            tracing::debug!(title = %err.0.title, "Notification dropped, receiver closed");
        }
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let Notification { title, description, severity } = notification;
        match severity {
            Severity::Error => tracing::error!(%title, %description, "Notification"),
            Severity::Warning => tracing::warn!(%title, %description, "Notification"),
            Severity::Info | Severity::Success => {
                tracing::info!(%title, %description, %severity, "Notification")
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.notify(Notification::info("Schema Refresh", "Simulating schema refresh..."));
        sink.notify(Notification::success("Schema Refreshed", "Schema has been updated."));

        assert_eq!(rx.recv().await.unwrap().title, "Schema Refresh");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.severity, Severity::Success);
    }

    #[test]
    fn test_channel_sink_survives_closed_receiver() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);
        sink.notify(Notification::error("Schema Refresh Failed", "boom"));
    }

    #[test]
    fn test_tracing_sink_accepts_every_severity() {
        for severity in [Severity::Info, Severity::Success, Severity::Warning, Severity::Error] {
            TracingSink.notify(Notification::new("t", "d", severity));
        }
    }
}
