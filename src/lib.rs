//! Failures as values.
//!
//! Guardrail runs a unit of work inside a catch-scope and hands back whatever went wrong as a
//! plain [`CapturedFailure`] instead of letting it unwind further up the stack. It is meant for the
//! boundary between code that may panic and code that would rather inspect a value: plugin calls,
//! callbacks handed to foreign code, best-effort steps in a batch.
//!
//!
//! # Usage
//!
//! Run work with [`guarded_invoke`] when only the failure matters, or with [`guard`] to keep the
//! return value. Raise a structured failure from inside the work with [`raise`]; ordinary panics
//! are intercepted too.
//!
//! ```rust
//! use guardrail::*;
//!
//! let failure = guarded_invoke(|| {
//!     raise(CapturedFailure::new("Timeout").with_context("peer", "10.0.0.7"));
//! });
//!
//! let failure = failure.unwrap();
//! assert_eq!(failure.description(), "Timeout");
//! assert_eq!(failure.context_value("peer"), Some("10.0.0.7"));
//! ```
//!
//! Every intercepted failure is reported exactly once, as a `Guarded exception = ...` line, to a
//! [`DiagnosticSink`]. The default [`TracingSink`] emits a [`tracing`] event; use
//! [`Guard::with_sink`] to report elsewhere.
//!
//!
//! # What is not intercepted
//!
//! Guards only absorb the catchable subset of failures:
//!
//! - [`Fatal`] conditions, raised with [`raise_fatal`], are propagated as-is and keep unwinding past
//!   the guard.
//! - When compiled with `panic = "abort"`, panics terminate the process before any guard sees them.
//!   Guards still run the work, and report no failure if it returns.
//! - Foreign exceptions and [`std::process::abort`] are never observable by a catch-scope.
//!
//! A failure that was intercepted never resurfaces by itself. To pass it on, call
//! [`CapturedFailure::raise`] explicitly.
//!
//!
//! # Side effects
//!
//! Side effects of the work up to the failure are kept; destructors of its locals have run as part
//! of unwinding. Guards do not roll anything back, retry, or hop threads: the work runs exactly
//! once, inline, on the calling thread.
//!
//! Note that `panic!` runs the panic hook before unwinding starts, so with the default hook a panic
//! is also printed to stderr. [`raise`] and [`raise_fatal`] do not invoke the hook.

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    clippy::pedantic,
    clippy::missing_const_for_fn,
    clippy::alloc_instead_of_core,
    clippy::allow_attributes,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    clippy::clone_on_ref_ptr,
    clippy::decimal_literal_representation,
    clippy::default_numeric_fallback,
    clippy::deref_by_slicing,
    clippy::else_if_without_else,
    clippy::empty_drop,
    clippy::empty_enum_variants_with_brackets,
    clippy::empty_structs_with_brackets,
    clippy::exhaustive_enums,
    clippy::format_push_string,
    clippy::infinite_loop,
    clippy::missing_assert_message,
    clippy::missing_inline_in_public_items,
    clippy::mixed_read_write_in_expression,
    clippy::mutex_atomic,
    clippy::needless_raw_strings,
    clippy::pub_without_shorthand,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::redundant_type_annotations,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::self_named_module_files,
    clippy::semicolon_inside_block,
    clippy::separated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::std_instead_of_alloc,
    clippy::string_lit_chars_any,
    clippy::string_to_string,
    clippy::tests_outside_test_module,
    clippy::try_err,
    clippy::unnecessary_self_imports,
    clippy::unneeded_field_pattern,
    clippy::unused_result_ok,
    clippy::wildcard_enum_match_arm,
)]

extern crate alloc;

mod api;
mod backend;
mod diagnostics;
mod failure;
mod fatal;
mod payload;

pub use api::{Guard, guard, guarded_invoke};
pub use diagnostics::{DIAGNOSTIC_LABEL, DiagnosticSink, TracingSink, diagnostic_line};
pub use failure::{CapturedFailure, raise};
pub use fatal::{Fatal, raise_fatal};
pub use payload::OPAQUE_DESCRIPTION;
