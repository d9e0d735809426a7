use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_BASE: &str = "https://api.gobiz.co.id";
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RATE_LIMIT_PER_MIN: u32 = 60;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 300 * 1024;

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_base: String,
    pub upstream_timeout_ms: u64,
    pub rate_limit_per_min: u32,
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub public_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
            upstream_timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
            rate_limit_per_min: DEFAULT_RATE_LIMIT_PER_MIN,
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            public_dir: "public".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let upstream_base = env::var("UPSTREAM_BASE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.upstream_base);

        let upstream_timeout_ms = parse_var("UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout_ms)?;

        let rate_limit_per_min = parse_var("RATE_LIMIT_PER_MIN", defaults.rate_limit_per_min)?;
        if rate_limit_per_min == 0 {
            return Err("RATE_LIMIT_PER_MIN must be greater than zero".to_string());
        }

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT", defaults.port)?;
        let body_limit_bytes = parse_var("BODY_LIMIT_BYTES", defaults.body_limit_bytes)?;
        let public_dir = env::var("PUBLIC_DIR").unwrap_or(defaults.public_dir);

        Ok(Self {
            upstream_base,
            upstream_timeout_ms,
            rate_limit_per_min,
            host,
            port,
            body_limit_bytes,
            public_dir,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a non-negative integer, got {:?}", name, raw)),
        _ => Ok(default),
    }
}
