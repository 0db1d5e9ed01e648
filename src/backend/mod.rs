use crate::payload::Payload;

/// A catch-scope.
///
/// Unwinding is a mechanism of forcefully "returning" through multiple call frames, up until a
/// special call frame, called *interceptor*. In Rust this is the `resume_unwind`/`catch_unwind`
/// pair; `panic!` starts unwinding too, after running the panic hook.
///
/// A backend decides which unwinds it hands back to the caller and which it lets through. It must
/// let the [`Fatal`](crate::Fatal) payload through untouched, so that an outer interceptor sees the
/// very same payload.
///
/// During unwinding, all destructors of locals are run, as if `return` was called.
pub(crate) trait Backend {
    /// Run `func` once on the current thread.
    ///
    /// Returns `Ok` if `func` returns normally, or `Err` with the payload if it unwinds with a
    /// catchable payload (and the unwind is not caught by a nested interceptor).
    fn intercept<Func: FnOnce() -> R, R>(func: Func) -> Result<R, Payload>;
}

#[cfg(panic = "unwind")]
#[path = "unwind.rs"]
mod imp;

#[cfg(not(panic = "unwind"))]
#[path = "abort.rs"]
mod imp;

pub(crate) use imp::ActiveBackend;

#[cfg(all(test, panic = "unwind"))]
mod test {
    use super::*;
    use crate::{CapturedFailure, Fatal};
    use std::panic::{catch_unwind, resume_unwind};

    fn cause(payload: Payload) -> CapturedFailure {
        *payload.downcast::<CapturedFailure>().unwrap()
    }

    #[test]
    fn intercept_ok() {
        let result = ActiveBackend::intercept(|| String::from("Hello, world!"));
        assert_eq!(result.unwrap(), "Hello, world!");
    }

    #[test]
    fn intercept_err() {
        let result: Result<(), Payload> =
            ActiveBackend::intercept(|| CapturedFailure::new("Hello, world!").raise());
        assert_eq!(cause(result.unwrap_err()).description(), "Hello, world!");
    }

    #[test]
    fn intercept_panic() {
        let result: Result<(), Payload> = ActiveBackend::intercept(|| panic!("Hello, world!"));
        assert_eq!(
            *result.unwrap_err().downcast_ref::<&'static str>().unwrap(),
            "Hello, world!",
        );
    }

    #[test]
    fn intercept_fatal() {
        let result = catch_unwind(|| {
            let _: Result<(), Payload> =
                ActiveBackend::intercept(|| resume_unwind(Box::new(Fatal::new("Hello, world!"))));
        });
        assert_eq!(
            result.unwrap_err().downcast_ref::<Fatal>().unwrap().reason(),
            "Hello, world!",
        );
    }

    #[test]
    fn nested_intercept() {
        let result: Result<Result<(), Payload>, Payload> = ActiveBackend::intercept(|| {
            ActiveBackend::intercept(|| CapturedFailure::new("Hello, world!").raise())
        });
        assert_eq!(
            cause(result.unwrap().unwrap_err()).description(),
            "Hello, world!",
        );
    }

    #[test]
    fn rethrow() {
        let result: Result<(), Payload> = ActiveBackend::intercept(|| {
            let result: Result<(), Payload> =
                ActiveBackend::intercept(|| CapturedFailure::new("Hello, world!").raise());
            resume_unwind(result.unwrap_err())
        });
        assert_eq!(cause(result.unwrap_err()).description(), "Hello, world!");
    }

    #[test]
    fn destructors_are_run() {
        struct Dropper<'a>(&'a mut bool);
        impl Drop for Dropper<'_> {
            fn drop(&mut self) {
                *self.0 = true;
            }
        }

        let mut destructor_was_run = false;
        let result: Result<(), Payload> = ActiveBackend::intercept(|| {
            let _dropper = Dropper(&mut destructor_was_run);
            CapturedFailure::new("Hello, world!").raise()
        });
        assert_eq!(cause(result.unwrap_err()).description(), "Hello, world!");

        assert!(destructor_was_run);
    }

    #[test]
    fn nested_with_drop() {
        struct Dropper;
        impl Drop for Dropper {
            fn drop(&mut self) {
                let result: Result<(), Payload> =
                    ActiveBackend::intercept(|| CapturedFailure::new("Awful idea").raise());
                assert_eq!(cause(result.unwrap_err()).description(), "Awful idea");
            }
        }

        let result: Result<(), Payload> = ActiveBackend::intercept(|| {
            let _dropper = Dropper;
            CapturedFailure::new("Hello, world!").raise()
        });
        assert_eq!(cause(result.unwrap_err()).description(), "Hello, world!");
    }
}
