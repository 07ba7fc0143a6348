use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "SpeedMED";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,speedmed=debug"
}

/// Get the application data directory
/// ~/SpeedMED/ on all platforms
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("SpeedMED")
}

/// Database file path. SPEEDMED_DB overrides the default location.
pub fn db_path() -> PathBuf {
    match std::env::var_os("SPEEDMED_DB") {
        Some(path) => PathBuf::from(path),
        None => app_data_dir().join("clinic.db"),
    }
}

/// Listen address. SPEEDMED_ADDR overrides the default 127.0.0.1:8080.
pub fn bind_addr() -> SocketAddr {
    match std::env::var("SPEEDMED_ADDR") {
        Ok(addr) => addr.parse().expect("SPEEDMED_ADDR must be host:port"),
        Err(_) => SocketAddr::from(([127, 0, 0, 1], 8080)),
    }
}
