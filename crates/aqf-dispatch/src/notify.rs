//! # Notification Seam
//!
//! Fire-and-forget delivery of transition events to the outside world
//! (SMS, push, whatever the deployment wires up). The lifecycle manager
//! never calls this — surrounding application code forwards the events
//! the manager returns. Delivery failure must never fail a transition,
//! so the contract has no error channel.

use async_trait::async_trait;

use aqf_state::TransitionEvent;

/// Fire-and-forget transition event consumer.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Forward one transition event. Implementations swallow their own
    /// failures; the transition has already been committed.
    async fn notify(&self, event: &TransitionEvent);
}

/// Sink that logs events through `tracing`. The default wiring when no
/// external notifier is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, event: &TransitionEvent) {
        tracing::info!(
            request_id = %event.request_id,
            from = %event.from,
            to = %event.to,
            occurred_at = %event.occurred_at,
            "request transition"
        );
    }
}
