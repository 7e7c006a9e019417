use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SESSION_CHECK_INTERVAL_SECS: u32 = 60;
pub const MIN_SESSION_CHECK_INTERVAL_SECS: u32 = 5;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u32 = 60;

/// Shape of `./config.json` and of the `window.__TIME_REPORT_*` globals.
/// Every field is optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfigFile {
    pub api_base_url: Option<String>,
    pub session_check_interval_secs: Option<u32>,
    pub download_timeout_secs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub session_check_interval_secs: u32,
    pub download_timeout_secs: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_check_interval_secs: DEFAULT_SESSION_CHECK_INTERVAL_SECS,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

impl RuntimeConfig {
    /// Applies `file` on top of `self`, ignoring blank URLs and clamping the
    /// session check interval to its minimum.
    pub fn merged_with(mut self, file: &RuntimeConfigFile) -> Self {
        if let Some(url) = file
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = file.session_check_interval_secs {
            self.session_check_interval_secs = secs.max(MIN_SESSION_CHECK_INTERVAL_SECS);
        }
        if let Some(secs) = file.download_timeout_secs.filter(|secs| *secs > 0) {
            self.download_timeout_secs = secs;
        }
        self
    }

    pub fn session_check_interval_ms(&self) -> u32 {
        self.session_check_interval_secs.saturating_mul(1000)
    }

    pub fn download_timeout_ms(&self) -> u32 {
        self.download_timeout_secs.saturating_mul(1000)
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfigFile> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let string_field = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .and_then(|v| v.as_string())
        })
    };
    let number_field = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .and_then(|v| v.as_f64())
                .filter(|n| *n >= 0.0)
                .map(|n| n as u32)
        })
    };
    Some(RuntimeConfigFile {
        api_base_url: string_field(&["API_BASE_URL", "api_base_url"]),
        session_check_interval_secs: number_field(&[
            "SESSION_CHECK_INTERVAL_SECS",
            "session_check_interval_secs",
        ]),
        download_timeout_secs: number_field(&["DOWNLOAD_TIMEOUT_SECS", "download_timeout_secs"]),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_name: &str) -> Option<RuntimeConfigFile> {
    None
}

async fn fetch_runtime_config() -> Option<RuntimeConfigFile> {
    if cfg!(not(target_arch = "wasm32")) {
        return None;
    }
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfigFile>().await.ok()
}

/// Resolves the runtime config once. Precedence, highest first:
/// `window.__TIME_REPORT_ENV` (env.js), `window.__TIME_REPORT_CONFIG`,
/// `./config.json`, built-in defaults.
pub async fn init() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    let mut resolved = RuntimeConfig::default();
    if let Some(file) = fetch_runtime_config().await {
        resolved = resolved.merged_with(&file);
    }
    if let Some(file) = read_global("__TIME_REPORT_CONFIG") {
        resolved = resolved.merged_with(&file);
    }
    if let Some(file) = read_global("__TIME_REPORT_ENV") {
        resolved = resolved.merged_with(&file);
    }
    RUNTIME_CONFIG.get_or_init(|| resolved).clone()
}

/// Current config, or the defaults when `init` has not completed yet.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn await_api_base_url() -> String {
    init().await.api_base_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_one_minute_session_check() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.session_check_interval_secs, 60);
        assert_eq!(cfg.session_check_interval_ms(), 60_000);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn merge_overrides_only_named_fields() {
        let file = RuntimeConfigFile {
            api_base_url: Some("https://reports.example.com/api/".into()),
            session_check_interval_secs: None,
            download_timeout_secs: Some(90),
        };
        let cfg = RuntimeConfig::default().merged_with(&file);
        assert_eq!(cfg.api_base_url, "https://reports.example.com/api");
        assert_eq!(cfg.session_check_interval_secs, 60);
        assert_eq!(cfg.download_timeout_secs, 90);
    }

    #[test]
    fn merge_ignores_blank_url_and_clamps_interval() {
        let file = RuntimeConfigFile {
            api_base_url: Some("   ".into()),
            session_check_interval_secs: Some(1),
            download_timeout_secs: Some(0),
        };
        let cfg = RuntimeConfig::default().merged_with(&file);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.session_check_interval_secs, MIN_SESSION_CHECK_INTERVAL_SECS);
        assert_eq!(cfg.download_timeout_secs, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
    }

    #[test]
    fn runtime_config_file_parses_partial_json() {
        let file: RuntimeConfigFile =
            serde_json::from_str(r#"{ "session_check_interval_secs": 30 }"#).unwrap();
        assert_eq!(file.session_check_interval_secs, Some(30));
        assert!(file.api_base_url.is_none());
    }
}
