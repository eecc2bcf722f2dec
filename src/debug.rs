//! Opt-in diagnostics on stderr.
//!
//! Output only appears in debug builds with `QR_DEBUG` set to a non-zero value.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| crate::config::env_flag("QR_DEBUG", false))
}

macro_rules! qr_debug {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        if $crate::debug::debug_enabled() {
            eprintln!($($arg)*);
        }
        #[cfg(not(debug_assertions))]
        {
            let _ = format_args!($($arg)*);
        }
    };
}

pub(crate) use qr_debug;
