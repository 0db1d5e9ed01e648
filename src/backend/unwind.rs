use super::Backend;
use crate::Fatal;
use crate::payload::Payload;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

pub(crate) struct ActiveBackend;

impl Backend for ActiveBackend {
    fn intercept<Func: FnOnce() -> R, R>(func: Func) -> Result<R, Payload> {
        // Partial state left behind by `func` belongs to the caller. Nothing here is touched after
        // an unwind.
        catch_unwind(AssertUnwindSafe(func)).map_err(|ex| {
            if ex.is::<Fatal>() {
                resume_unwind(ex);
            }
            ex
        })
    }
}
