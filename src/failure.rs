use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use std::panic::resume_unwind;
use thiserror::Error;

/// A failure intercepted by a guard.
///
/// This is a plain snapshot: the description, optional message and context were copied out of the
/// unwinding payload at the moment it was caught, so the value holds no reference to the payload
/// or to the unwinding machinery.
///
/// There are no `&mut` accessors. Builder methods consume `self`, so a failure is only ever shaped
/// before it is raised or handed out, and stays as it is afterwards.
///
/// # Example
///
/// ```rust
/// use guardrail::*;
///
/// let failure = guarded_invoke(|| {
///     CapturedFailure::new("NilDereference")
///         .with_message("attempted to call method on null")
///         .raise();
/// })
/// .unwrap();
///
/// assert_eq!(failure.description(), "NilDereference");
/// assert_eq!(failure.message(), Some("attempted to call method on null"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct CapturedFailure {
    description: String,
    message: Option<String>,
    context: BTreeMap<String, String>,
}

impl CapturedFailure {
    /// Create a failure with the given description and nothing else.
    #[inline]
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            message: None,
            context: BTreeMap::new(),
        }
    }

    /// Attach a reason.
    #[inline]
    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Attach a key-value pair of context. A repeated key keeps the last value.
    #[inline]
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Human-readable name of the failure.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reason given for the failure, if any.
    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// All context attached to the failure.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    /// Context value stored under `key`.
    #[inline]
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    /// Raise this failure.
    ///
    /// The closest enclosing guard intercepts it and returns an equal value. This is how a caller
    /// hands a failure it got back from one guard on to an outer one.
    ///
    /// Unlike `panic!`, raising does not invoke the panic hook. Outside of any guard, the failure
    /// unwinds like a panic and terminates the thread.
    #[inline]
    pub fn raise(self) -> ! {
        resume_unwind(alloc::boxed::Box::new(self))
    }
}

impl fmt::Display for CapturedFailure {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Raise a failure. Equivalent to [`CapturedFailure::raise`].
///
/// # Example
///
/// ```rust
/// use guardrail::*;
///
/// let res = guard::<u32>(|| raise(CapturedFailure::new("Timeout")));
/// assert_eq!(res.unwrap_err().description(), "Timeout");
/// ```
#[inline]
pub fn raise(failure: CapturedFailure) -> ! {
    failure.raise()
}
