use crate::error::{Result as ServerErrorResult, ServerError};

use std::net::SocketAddr;
use std::path::PathBuf;

use log::LevelFilter;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// SQLite database file (default: matchpoint.db)
    pub database_path: PathBuf,

    /// Log level (default: info)
    pub log_level: LevelFilter,

    /// Enable colored logs (default: true)
    pub log_colored: bool,

    /// Optional log file; when set, output goes there instead of stdout
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ServerErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|source| ServerError::InvalidBindAddr { source })?;

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("matchpoint.db"));

        let log_level = parse_log_level(std::env::var("LOG_LEVEL").ok().as_deref());

        let log_colored = std::env::var("LOG_COLORED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        let log_file = std::env::var("LOG_FILE").ok().map(PathBuf::from);

        Ok(Self {
            bind_addr,
            database_path,
            log_level,
            log_colored,
            log_file,
        })
    }

    pub fn log_summary(&self) {
        log::info!("Config: bind_addr={}", self.bind_addr);
        log::info!("Config: database_path={}", self.database_path.display());
        log::info!("Config: log_level={:?}", self.log_level);
    }
}

/// Invalid or missing values fall back to Info rather than failing startup
fn parse_log_level(value: Option<&str>) -> LevelFilter {
    match value.unwrap_or("info").to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
