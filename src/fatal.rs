use alloc::string::String;
use std::panic::resume_unwind;
use thiserror::Error;

/// An unrecoverable condition.
///
/// Guards do not intercept this payload: when the guarded work raises it, the guard lets it keep
/// unwinding past its own call, to an outer [`std::panic::catch_unwind`] or to the thread
/// boundary.
///
/// Panics in `panic = "abort"` builds, foreign exceptions and [`std::process::abort`] are not
/// intercepted either, but they never reach a guard in the first place.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("fatal: {reason}")]
pub struct Fatal {
    reason: String,
}

impl Fatal {
    /// Create a condition with the given reason.
    #[inline]
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the condition was raised.
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Unwind with this condition as the payload. The panic hook is not invoked.
    #[inline]
    pub fn raise(self) -> ! {
        resume_unwind(alloc::boxed::Box::new(self))
    }
}

/// Raise a condition that no guard intercepts.
///
/// # Example
///
/// ```rust
/// use guardrail::*;
///
/// let escaped = std::panic::catch_unwind(|| {
///     let _ = guarded_invoke(|| raise_fatal("heap exhausted"));
/// })
/// .unwrap_err();
///
/// assert_eq!(escaped.downcast_ref::<Fatal>().unwrap().reason(), "heap exhausted");
/// ```
#[inline]
pub fn raise_fatal(reason: impl Into<String>) -> ! {
    Fatal::new(reason).raise()
}
