//! Debug logging for code generation.
//!
//! Compiles to nothing unless the `debug-codegen` feature is enabled.

/// Debug logging macro that compiles to nothing when `debug-codegen` is disabled.
///
/// # Examples
///
/// ```ignore
/// debug_codegen!("registered type {} as {}", ty.to_id(), id);
/// ```
#[cfg(feature = "debug-codegen")]
macro_rules! debug_codegen {
    ($($arg:tt)*) => {
        {
            // Only test builds have std to print with
            #[cfg(test)]
            {
                extern crate std;
                std::eprintln!("[codegen] {}", core::format_args!($($arg)*));
            }
            #[cfg(not(test))]
            {
                let _ = core::format_args!($($arg)*);
            }
        }
    };
}

/// Debug logging macro that compiles to nothing when `debug-codegen` is disabled.
#[cfg(not(feature = "debug-codegen"))]
macro_rules! debug_codegen {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_codegen;
