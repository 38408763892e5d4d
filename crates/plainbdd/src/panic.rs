//! Rendering of panic payloads caught around step handlers.

use std::any::Any;

/// Extract a human-readable message from a panic payload.
///
/// `panic!` with a literal or a formatted message produces `&str` or
/// `String` payloads; a few primitive payloads are rendered too. Anything
/// else is described by its type id.
///
/// # Examples
/// ```
/// use plainbdd::panic_message;
///
/// let err = std::panic::catch_unwind(|| panic!("boom {}", 7))
///     .expect_err("expected panic");
/// assert_eq!(panic_message(err.as_ref()), "boom 7");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    macro_rules! try_downcast {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(val) = payload.downcast_ref::<$ty>() {
                    return val.to_string();
                }
            )*
        };
    }

    try_downcast!(&str, String, i32, u32, i64, u64, isize, usize, bool);
    format!("opaque panic payload ({:?})", payload.type_id())
}
