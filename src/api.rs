use super::{
    CapturedFailure,
    backend::{ActiveBackend, Backend},
    diagnostics::{DiagnosticSink, TracingSink, emit},
    payload::extract,
};

/// A catch-scope factory with a configured diagnostic sink.
///
/// Each [`invoke`](Guard::invoke) or [`run`](Guard::run) call sets up its own catch-scope around
/// exactly one call of the work, on the calling thread, and tears it down before returning. A
/// `Guard` holds no mutable state, so one instance can be shared by any number of threads.
///
/// # Example
///
/// ```rust
/// use guardrail::*;
/// use std::sync::Mutex;
///
/// let lines = Mutex::new(Vec::new());
/// let guard = Guard::with_sink(|failure: &CapturedFailure| {
///     lines.lock().unwrap().push(diagnostic_line(failure));
/// });
///
/// assert_eq!(guard.invoke(|| {}), None);
/// assert_eq!(
///     guard.invoke(|| panic!("IndexOutOfRange")).unwrap().description(),
///     "IndexOutOfRange",
/// );
/// assert_eq!(*lines.lock().unwrap(), ["Guarded exception = IndexOutOfRange"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Guard<S = TracingSink> {
    sink: S,
}

impl Guard {
    /// A guard that reports to [`TracingSink`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: DiagnosticSink> Guard<S> {
    /// A guard that reports to `sink`.
    #[inline]
    #[must_use]
    pub const fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// The sink this guard reports to.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Run `work` and report whether it failed.
    ///
    /// Returns [`None`] if `work` returns normally. If `work` panics or [raises](crate::raise) a
    /// failure, the failure is recorded to the sink once and returned in [`Some`].
    ///
    /// [`Fatal`](crate::Fatal) conditions are propagated as-is and not caught.
    #[inline]
    pub fn invoke(&self, work: impl FnOnce()) -> Option<CapturedFailure> {
        self.run(work).err()
    }

    /// Run `work`, keeping its return value.
    ///
    /// If `work` returns a value, this function wraps it in [`Ok`]. Otherwise the intercepted
    /// failure is recorded to the sink once and returned in [`Err`].
    ///
    /// [`Fatal`](crate::Fatal) conditions are propagated as-is and not caught.
    ///
    /// # Errors
    ///
    /// Returns the failure `work` panicked or raised with.
    #[inline]
    pub fn run<R>(&self, work: impl FnOnce() -> R) -> Result<R, CapturedFailure> {
        ActiveBackend::intercept(work).map_err(|payload| {
            let failure = extract(payload);
            emit(&self.sink, &failure);
            failure
        })
    }
}

/// Run `work` and return its failure, if any.
///
/// Reports the failure to [`TracingSink`]. Use [`Guard::with_sink`] to report elsewhere.
///
/// Panic payloads are read eagerly: raised failures keep everything, `&str` and `String` panics
/// become the description, and a `Box<dyn Error + Send + Sync>` payload gives its `Display` and
/// the `Display` of its source. Any other payload type, such as a concrete error passed to
/// [`std::panic::panic_any`], is reported as [`OPAQUE_DESCRIPTION`](crate::OPAQUE_DESCRIPTION)
/// and its text is lost. Use [`raise`](crate::raise), or box the error as
/// `Box<dyn Error + Send + Sync>`, to keep it.
///
/// # Example
///
/// ```rust
/// use guardrail::*;
///
/// assert_eq!(guarded_invoke(|| {}), None);
///
/// let failure = guarded_invoke(|| {
///     let items: Vec<u32> = Vec::new();
///     let _value = items[3];
/// })
/// .unwrap();
/// assert!(failure.description().starts_with("index out of bounds"));
/// ```
#[inline]
pub fn guarded_invoke(work: impl FnOnce()) -> Option<CapturedFailure> {
    Guard::new().invoke(work)
}

/// Run `work`, keeping its return value.
///
/// If `work` returns a value, this function wraps it in [`Ok`]. If it panics or
/// [raises](crate::raise) a failure, the failure is reported to [`TracingSink`] and returned in
/// [`Err`].
///
/// Panic payloads are read eagerly: raised failures keep everything, `&str` and `String` panics
/// become the description, and a `Box<dyn Error + Send + Sync>` payload gives its `Display` and
/// the `Display` of its source. Any other payload type, such as a concrete error passed to
/// [`std::panic::panic_any`], is reported as [`OPAQUE_DESCRIPTION`](crate::OPAQUE_DESCRIPTION)
/// and its text is lost. Use [`raise`](crate::raise), or box the error as
/// `Box<dyn Error + Send + Sync>`, to keep it.
///
/// # Errors
///
/// Returns the failure `work` panicked or raised with.
///
/// # Example
///
/// ```rust
/// use anyhow::{Context, Result};
/// use guardrail::*;
///
/// fn port(raw: &str) -> Result<u16> {
///     guard(|| raw.parse::<u16>())?.context("not a port")
/// }
///
/// assert_eq!(port("8080").unwrap(), 8080);
/// assert!(port("http").is_err());
/// ```
#[inline]
pub fn guard<R>(work: impl FnOnce() -> R) -> Result<R, CapturedFailure> {
    Guard::new().run(work)
}
