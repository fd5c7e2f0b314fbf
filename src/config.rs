use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pixelwar.rezoleo.fr/";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_PREVIEW_MAX_WIDTH: u32 = 80;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub image_dir: PathBuf,
    pub http_timeout: Duration,
    pub max_attempts: u32,
    pub preview_max_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_dir: default_image_dir(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            preview_max_width: DEFAULT_PREVIEW_MAX_WIDTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("PIXELWAR_BASE_URL").unwrap_or(defaults.base_url);
        let image_dir = std::env::var("PIXELWAR_IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.image_dir);
        let http_timeout = Duration::from_secs(parse_var(
            "PIXELWAR_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        ));
        let max_attempts = parse_var("PIXELWAR_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS).max(1);
        let preview_max_width = parse_var("PIXELWAR_PREVIEW_MAX_WIDTH", DEFAULT_PREVIEW_MAX_WIDTH);

        Self {
            base_url,
            image_dir,
            http_timeout,
            max_attempts,
            preview_max_width,
        }
    }

    /// Join an endpoint name onto the base URL, tolerating a missing trailing slash
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {name}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

// Images are expected next to the executable, like a dropped-in script
fn default_image_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
