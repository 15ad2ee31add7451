//! Site configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_CV_PATH: &str = "rec/CV_Leonardo_Nieto_AI_Engineer.pdf";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_SESSION_SWEEP_SECS: u64 = 60;
pub const DEFAULT_VISION_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Directory served under `/static` (stylesheet, sidebar script).
    pub static_dir: PathBuf,
    /// Downloadable CV offered on the contact page.
    pub cv_path: PathBuf,
    /// Idle time after which a browser session's transcripts are dropped.
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub vision_max_upload_bytes: usize,
}

impl SiteConfig {
    /// Build the site config from environment variables.
    ///
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `STATIC_DIR`: default `<crate>/static`
    /// - `CV_PATH`: default `rec/CV_Leonardo_Nieto_AI_Engineer.pdf`
    /// - `SESSION_TTL_SECS`: default 3600
    /// - `SESSION_SWEEP_SECS`: default 60
    /// - `VISION_MAX_UPLOAD_BYTES`: default 10 MiB
    ///
    /// Unparsable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            port: env_parse("PORT", DEFAULT_PORT),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_static_dir()),
            cv_path: std::env::var("CV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CV_PATH)),
            session_ttl: Duration::from_secs(env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
            session_sweep_interval: Duration::from_secs(
                env_parse("SESSION_SWEEP_SECS", DEFAULT_SESSION_SWEEP_SECS).max(1),
            ),
            vision_max_upload_bytes: env_parse("VISION_MAX_UPLOAD_BYTES", DEFAULT_VISION_MAX_UPLOAD_BYTES),
        }
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            static_dir: default_static_dir(),
            cv_path: PathBuf::from(DEFAULT_CV_PATH),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            session_sweep_interval: Duration::from_secs(DEFAULT_SESSION_SWEEP_SECS),
            vision_max_upload_bytes: DEFAULT_VISION_MAX_UPLOAD_BYTES,
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
