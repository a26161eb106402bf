//! Build-time environment configuration.
//!
//! Values are baked in with `option_env!` when the wasm bundle is built, the
//! same way a bundler inlines public environment variables. Anything the user
//! may change at runtime lives in [`crate::models::AppSettings`] instead.

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:6060";

/// Plan used when neither the path nor the query string names one.
pub const TEST_PLAN_ID: &str = "22222222-2222-2222-2222-222222222222";

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub api_base_url: String,
    pub test_plan_id: String,
    pub log_level: LevelFilter,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            test_plan_id: TEST_PLAN_ID.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Environment {
    /// Read the compile-time environment, falling back to defaults for
    /// anything unset or blank.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("FLOW_API_BASE_URL"),
            option_env!("FLOW_TEST_PLAN_ID"),
            option_env!("FLOW_LOG_LEVEL"),
        )
    }

    fn from_values(base_url: Option<&str>, plan_id: Option<&str>, level: Option<&str>) -> Self {
        let defaults = Self::default();
        let non_blank = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

        let log_level = match level.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("[Config] unknown log level {:?}, using {}", raw, defaults.log_level);
                defaults.log_level
            }),
            None => defaults.log_level,
        };

        Self {
            api_base_url: non_blank(base_url)
                .map(|u| clean_base_url(&u))
                .unwrap_or(defaults.api_base_url),
            test_plan_id: non_blank(plan_id).unwrap_or(defaults.test_plan_id),
            log_level,
        }
    }
}

pub fn clean_base_url(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
