//! Build Configuration
//!
//! Backend targets are hardcoded; a build may override them through
//! compile-time environment variables. Nothing is read at runtime.

use log::LevelFilter;

pub const DEFAULT_REALTIME_URL: &str =
    "https://blue-todo-backand-default-rtdb.asia-southeast1.firebasedatabase.app";
pub const DEFAULT_REST_URL: &str = "http://localhost:5000";

/// Collection path / resource name on both backends
pub const COLLECTION: &str = "todos";
/// localStorage key of the last known realtime snapshot
pub const CACHE_KEY: &str = "todos";

pub const DELETE_TRANSITION_MS: u32 = 400;
pub const SHAKE_MS: u64 = 500;
pub const COUNTER_ANIMATION_MS: f64 = 300.0;
pub const EDIT_FOCUS_DELAY_MS: u64 = 100;
pub const ROW_STAGGER_SECS: f64 = 0.05;

/// Which persistence strategy this build talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendVariant {
    /// Push-based database; every change re-delivers the whole collection
    Realtime,
    /// Request/response CRUD API; the local list is patched from responses
    Rest,
}

impl BackendVariant {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realtime" | "firebase" => Some(BackendVariant::Realtime),
            "rest" => Some(BackendVariant::Rest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub variant: BackendVariant,
    pub realtime_url: String,
    pub rest_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: BackendVariant::Realtime,
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
            rest_url: DEFAULT_REST_URL.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `BLUE_TODO_*` variables set at build time
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("BLUE_TODO_BACKEND"),
            option_env!("BLUE_TODO_REALTIME_URL"),
            option_env!("BLUE_TODO_REST_URL"),
            option_env!("BLUE_TODO_LOG"),
        )
    }

    fn with_overrides(
        backend: Option<&str>,
        realtime_url: Option<&str>,
        rest_url: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(variant) = backend.and_then(BackendVariant::parse) {
            config.variant = variant;
        }
        if let Some(url) = realtime_url.filter(|u| !u.trim().is_empty()) {
            config.realtime_url = trim_base(url);
        }
        if let Some(url) = rest_url.filter(|u| !u.trim().is_empty()) {
            config.rest_url = trim_base(url);
        }
        if let Some(level) = log_level.and_then(|l| l.parse::<LevelFilter>().ok()) {
            config.log_level = level;
        }
        config
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
