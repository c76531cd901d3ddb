//! Event targets the terminal formatter styles specially.

#[doc(hidden)]
pub use tracing;

/// Target for lines that should be written verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "darkly::print";

/// Target for positive outcomes, rendered with the success symbol.
pub const SUCCESS_TARGET: &str = "darkly::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
