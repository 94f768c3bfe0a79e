// src/log.rs
use std::io::Write;
use std::sync::Once;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the stderr logger. Warn by default; `RUST_LOG` overrides.
/// Safe to call more than once (tests, benches).
pub fn init() {
    INIT.call_once(|| {
        let _ = Builder::new()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] - {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.args()
                )
            })
            .filter(None, LevelFilter::Warn)
            .parse_default_env()
            .try_init();
    });
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::log::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::log::error!($($arg)*)
    };
}
