//! Outcome reporting (the "notify the user" sink).

use std::sync::Arc;

use rocketcart_cart::Notice;
use rocketcart_events::EventBus;

/// One-way sink for user-facing outcome notices.
pub trait OutcomeReporter: Send + Sync {
    fn report(&self, notice: Notice);
}

impl<R> OutcomeReporter for Arc<R>
where
    R: OutcomeReporter + ?Sized,
{
    fn report(&self, notice: Notice) {
        (**self).report(notice)
    }
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl OutcomeReporter for LogReporter {
    fn report(&self, notice: Notice) {
        tracing::warn!(
            operation = %notice.operation,
            kind = ?notice.kind,
            "{}",
            notice.message
        );
    }
}

/// Publishes notices on a bus so a UI layer can render them.
#[derive(Debug)]
pub struct BusReporter<B> {
    bus: B,
}

impl<B> BusReporter<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B> OutcomeReporter for BusReporter<B>
where
    B: EventBus<Notice>,
{
    fn report(&self, notice: Notice) {
        if let Err(err) = self.bus.publish(notice) {
            tracing::error!("failed to publish outcome notice: {err}");
        }
    }
}
