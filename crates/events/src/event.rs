use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts describing a committed transition. They are not
/// stored on their own; the state they produce is.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "cart.line_item.appended").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (wall-clock time of the decision).
    fn occurred_at(&self) -> DateTime<Utc>;
}
