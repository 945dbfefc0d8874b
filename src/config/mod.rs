//! Configuration module for the banner backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default calendar feed: major holidays, Ashkenazi transliterations, JSON output.
pub const DEFAULT_CALENDAR_URL: &str = "https://www.hebcal.com/hebcal?v=1&cfg=json&maj=on&lg=a";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to the V1 banner collection file
    pub v1_path: PathBuf,
    /// Path to the V2 banner collection file
    pub v2_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Calendar feed endpoint; `start` and `end` are appended as query parameters
    pub calendar_url: String,
    /// Days past today included in the calendar window
    pub lookahead_days: u32,
    /// Timeout for a single calendar feed request
    pub feed_timeout: Duration,
    /// Whether the daily reconciliation job runs
    pub reconcile_enabled: bool,
    /// UTC hour at which the daily reconciliation runs
    pub reconcile_hour_utc: u32,
    /// Optional JSON file replacing the built-in holiday table
    pub holidays_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BANNER_API_PSK").ok();

        let v1_path = env::var("BANNER_V1_FILE")
            .unwrap_or_else(|_| "./data/banners_v1.json".to_string())
            .into();

        let v2_path = env::var("BANNER_V2_FILE")
            .unwrap_or_else(|_| "./data/banners_v2.json".to_string())
            .into();

        let bind_addr = env::var("BANNER_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BANNER_BIND_ADDR format");

        let log_level = env::var("BANNER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let calendar_url =
            env::var("BANNER_CALENDAR_URL").unwrap_or_else(|_| DEFAULT_CALENDAR_URL.to_string());

        let lookahead_days = env::var("BANNER_LOOKAHEAD_DAYS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        let feed_timeout = Duration::from_secs(
            env::var("BANNER_FEED_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(20),
        );

        let reconcile_enabled = match env::var("BANNER_RECONCILE_ENABLED") {
            Ok(v) => !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            ),
            Err(_) => true,
        };

        let reconcile_hour_utc = env::var("BANNER_RECONCILE_HOUR_UTC")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|hour| *hour < 24)
            .unwrap_or(0);

        let holidays_path = env::var("BANNER_HOLIDAYS_FILE").ok().map(PathBuf::from);

        Self {
            api_psk,
            v1_path,
            v2_path,
            bind_addr,
            log_level,
            calendar_url,
            lookahead_days,
            feed_timeout,
            reconcile_enabled,
            reconcile_hour_utc,
            holidays_path,
        }
    }
}
