use std::str::FromStr;
use std::time::Duration;

use artisan_core::gallery::{AutoAdvance, DEFAULT_AUTO_SLIDE_INTERVAL};

/// Gallery behaviour on product detail pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Whether slides advance on their own (default: `true`).
    pub auto_slide: bool,
    /// Delay between automatic advances (default: 3000 ms). Zero disables
    /// auto-advance.
    pub interval: Duration,
}

impl GalleryConfig {
    /// Auto-advance schedule for a new gallery view.
    pub fn auto_advance(&self) -> AutoAdvance {
        AutoAdvance::new(self.auto_slide, self.interval)
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            auto_slide: true,
            interval: DEFAULT_AUTO_SLIDE_INTERVAL,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to drain after the listener stops
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. Without one the server runs on the built-in fixture
    /// catalog.
    pub database_url: Option<String>,
    pub gallery: GalleryConfig,
    /// reCAPTCHA secret. Contact submissions are only verified when set.
    pub recaptcha_secret: Option<String>,
    /// Brevo API key. Contacts are only logged when unset.
    pub brevo_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | unset (fixture catalog)    |
    /// | `GALLERY_AUTO_SLIDE`   | `true`                     |
    /// | `GALLERY_INTERVAL_MS`  | `3000`                     |
    /// | `RECAPTCHA_SECRET_KEY` | unset                      |
    /// | `BREVO_API_KEY`        | unset                      |
    ///
    /// Values that fail to parse fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16);

        let cors_origins: Vec<String> = non_empty("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64);
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30u64);

        let defaults = GalleryConfig::default();
        let gallery = GalleryConfig {
            auto_slide: parse_or(&lookup, "GALLERY_AUTO_SLIDE", defaults.auto_slide),
            interval: Duration::from_millis(parse_or(
                &lookup,
                "GALLERY_INTERVAL_MS",
                defaults.interval.as_millis() as u64,
            )),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url: non_empty("DATABASE_URL"),
            gallery,
            recaptcha_secret: non_empty("RECAPTCHA_SECRET_KEY"),
            brevo_api_key: non_empty("BREVO_API_KEY"),
        }
    }
}

/// Parse `key` as `T`, falling back to `default` when unset or invalid.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, %default, "Invalid configuration value, using default");
            default
        }
    }
}
