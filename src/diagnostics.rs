use super::CapturedFailure;
use crate::payload::discard;
use alloc::string::String;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Fixed label that starts every diagnostic line.
pub const DIAGNOSTIC_LABEL: &str = "Guarded exception =";

/// Render the diagnostic line for `failure`.
///
/// ```rust
/// use guardrail::*;
///
/// let line = diagnostic_line(&CapturedFailure::new("Timeout"));
/// assert_eq!(line, "Guarded exception = Timeout");
/// ```
#[inline]
#[must_use]
pub fn diagnostic_line(failure: &CapturedFailure) -> String {
    alloc::format!("{DIAGNOSTIC_LABEL} {failure}")
}

/// Where guards report the failures they intercept.
///
/// Closures taking `&CapturedFailure` are sinks; annotate the argument type so the closure is
/// general over the reference lifetime.
///
/// A guard calls [`record`](DiagnosticSink::record) exactly once per intercepted failure and never
/// on success. Sinks are fire-and-forget: if `record` panics, the guard swallows that panic and
/// returns the failure it intercepted anyway.
pub trait DiagnosticSink: Send + Sync {
    /// Report one intercepted failure.
    fn record(&self, failure: &CapturedFailure);
}

impl<F: Fn(&CapturedFailure) + Send + Sync> DiagnosticSink for F {
    #[inline]
    fn record(&self, failure: &CapturedFailure) {
        self(failure);
    }
}

/// The default sink: one `ERROR` event under the `guardrail` target.
///
/// The event message is the [`diagnostic_line`]. The description is attached as the `description`
/// field and the failure's message, if any, as the `reason` field (`message` is the event message
/// itself in `tracing`).
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    #[inline]
    fn record(&self, failure: &CapturedFailure) {
        tracing::error!(
            target: "guardrail",
            description = failure.description(),
            reason = failure.message(),
            "{}",
            diagnostic_line(failure),
        );
    }
}

/// Hand `failure` to `sink`, containing any panic raised by the sink.
pub(crate) fn emit<S: DiagnosticSink + ?Sized>(sink: &S, failure: &CapturedFailure) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| sink.record(failure))) {
        discard(payload);
    }
}
