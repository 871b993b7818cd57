use std::{error::Error, fmt::Display, str::FromStr};

use backtrace::Backtrace;
use tracing::{debug, error, info, level_filters::LevelFilter, warn};

pub fn init(display_level: &bool, level_filter: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let level_filter = LevelFilter::from_str(level_filter)?;

    tracing_subscriber::fmt()
        .with_level(*display_level)
        .with_max_level(level_filter)
        .try_init()
}

pub fn debug<T: Display>(prefix: Option<&str>, msg: T) {
    match prefix {
        Some(prefix) => debug!("{prefix} {msg}"),
        None => debug!("🐞 {msg}"),
    };
}

pub fn info<T: Display>(prefix: Option<&str>, msg: T) {
    match prefix {
        Some(prefix) => info!("{prefix} {msg}"),
        None => info!("📢 {msg}"),
    };
}

pub fn warn<T: Display>(prefix: Option<&str>, msg: T) {
    match prefix {
        Some(prefix) => warn!("{prefix} {msg}"),
        None => warn!("⚠️ {msg}"),
    };
}

pub fn error<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("🚨");
    if show_backtrace() {
        error!("{prefix} {msg}\n{:?}", Backtrace::new());
    } else {
        error!("{prefix} {msg}");
    }
}

/// Logs a built SQL statement together with the number of bound parameters.
pub fn statement<T: Display>(component: &str, sql: T, params: usize) {
    self::debug(Some("🧾"), format!("[{component}] {sql} ({params} params)"));
}

fn show_backtrace() -> bool {
    std::env::var("RUST_BACKTRACE").is_ok_and(|var| var == "1")
}
