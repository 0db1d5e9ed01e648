use super::CapturedFailure;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::Any;
use core::error::Error;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Whatever a caught unwind carried.
pub type Payload = Box<dyn Any + Send>;

/// Description used when the payload is of a type we can't read anything out of. Matches what the
/// standard panic hook prints for such payloads.
pub const OPAQUE_DESCRIPTION: &str = "Box<dyn Any>";

/// Copy everything we know how to read out of `payload`, then [`discard`] it.
///
/// Only raised failures, string panics and `Box<dyn Error + Send + Sync>` payloads are readable.
/// Any other type, including concrete error types passed to `panic_any`, yields
/// [`OPAQUE_DESCRIPTION`].
pub fn extract(payload: Payload) -> CapturedFailure {
    let payload = match payload.downcast::<CapturedFailure>() {
        Ok(failure) => return *failure,
        Err(payload) => payload,
    };

    let failure = read(&*payload);
    discard(payload);
    failure
}

fn read(payload: &(dyn Any + Send)) -> CapturedFailure {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        return from_panic(text);
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return from_panic(text);
    }

    if let Some(err) = payload.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        let failure = CapturedFailure::new(err.to_string());
        return match err.source() {
            Some(source) => failure.with_message(source.to_string()),
            None => failure,
        };
    }

    CapturedFailure::new(OPAQUE_DESCRIPTION)
}

/// Drop a payload without letting its destructor unwind into the caller.
///
/// A panic from the destructor is caught; if that second payload panics on drop as well, it is
/// leaked.
pub fn discard(payload: Payload) {
    if let Err(nested) = catch_unwind(AssertUnwindSafe(move || drop(payload))) {
        core::mem::forget(nested);
    }
}

fn from_panic(text: &str) -> CapturedFailure {
    CapturedFailure::new(text).with_context("kind", "panic")
}

#[cfg(test)]
mod test {
    use super::*;
    use core::fmt;

    #[test]
    fn raised_failure_is_taken_as_is() {
        let raised = CapturedFailure::new("Timeout")
            .with_message("no reply")
            .with_context("peer", "10.0.0.1");
        assert_eq!(extract(Box::new(raised.clone())), raised);
    }

    #[test]
    fn static_str_panic() {
        let failure = extract(Box::new("IndexOutOfRange"));
        assert_eq!(failure.description(), "IndexOutOfRange");
        assert_eq!(failure.message(), None);
        assert_eq!(failure.context_value("kind"), Some("panic"));
    }

    #[test]
    fn formatted_panic() {
        let failure = extract(Box::new(String::from("index out of bounds: the len is 3")));
        assert_eq!(failure.description(), "index out of bounds: the len is 3");
        assert_eq!(failure.context_value("kind"), Some("panic"));
    }

    #[test]
    fn boxed_error_with_source() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("failed to load settings")
            }
        }

        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let err: Box<dyn Error + Send + Sync> = Box::new(Outer(std::io::Error::other("disk gone")));
        let failure = extract(Box::new(err));
        assert_eq!(failure.description(), "failed to load settings");
        assert_eq!(failure.message(), Some("disk gone"));
        assert!(failure.context().is_empty());
    }

    #[test]
    fn boxed_error_without_source() {
        let err: Box<dyn Error + Send + Sync> = "plain".into();
        let failure = extract(Box::new(err));
        assert_eq!(failure.description(), "plain");
        assert_eq!(failure.message(), None);
    }

    struct Bomb;

    impl Drop for Bomb {
        fn drop(&mut self) {
            std::panic::panic_any(Shrapnel);
        }
    }

    struct Shrapnel;

    impl Drop for Shrapnel {
        fn drop(&mut self) {
            panic!("shrapnel");
        }
    }

    #[test]
    fn panicking_payload_is_read_then_contained() {
        let failure = extract(Box::new(Bomb));
        assert_eq!(failure.description(), OPAQUE_DESCRIPTION);
    }

    #[test]
    fn discard_leaks_a_second_panicking_payload() {
        discard(Box::new(Bomb));
        discard(Box::new(Shrapnel));
    }

    #[test]
    fn opaque_payload() {
        let failure = extract(Box::new(42_u32));
        assert_eq!(failure.description(), OPAQUE_DESCRIPTION);
        assert_eq!(failure.message(), None);
    }
}
