use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "switchboard.toml",
    "config/switchboard.toml",
    "crates/config/switchboard.toml",
    "../switchboard.toml",
    "../config/switchboard.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
}

/// Where and how the client reaches the Switchboard API.
///
/// ```
/// use switchboard_config::ApiConfig;
///
/// let api = ApiConfig::default();
/// assert_eq!(api.base_url, "http://127.0.0.1:7070/api");
/// assert_eq!(api.request_timeout_seconds, 30);
/// assert!(api.auth_token.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Bearer token of the established session
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl ApiConfig {
    fn default_base_url() -> String {
        "http://127.0.0.1:7070/api".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
            auth_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Subscribe to push events when a channel is available
    #[serde(default = "RealtimeConfig::default_enabled")]
    pub enabled: bool,
    /// Capacity of the in-process frame queue
    #[serde(default = "RealtimeConfig::default_event_buffer")]
    pub event_buffer: usize,
}

impl RealtimeConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_event_buffer() -> usize {
        256
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            event_buffer: Self::default_event_buffer(),
        }
    }
}

/// Load the client configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use switchboard_config::load;
///
/// std::env::remove_var("SWITCHBOARD_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.api.base_url.is_empty());
/// ```
pub fn load() -> anyhow::Result<ClientConfig> {
    let defaults = ClientConfig::default();

    let timeout = i64::try_from(defaults.api.request_timeout_seconds).unwrap_or(i64::MAX);
    let event_buffer = i64::try_from(defaults.realtime.event_buffer).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("api.base_url", defaults.api.base_url.clone())
        .context("invalid default for api.base_url")?
        .set_default("api.request_timeout_seconds", timeout)
        .context("invalid default for api.request_timeout_seconds")?
        .set_default("realtime.enabled", defaults.realtime.enabled)
        .context("invalid default for realtime.enabled")?
        .set_default("realtime.event_buffer", event_buffer)
        .context("invalid default for realtime.event_buffer")?;

    let environment_overrides =
        config::Environment::with_prefix("SWITCHBOARD").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("SWITCHBOARD_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via SWITCHBOARD_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<ClientConfig>()
        .context("invalid configuration")?;

    // a zero-capacity queue cannot be created
    if config.realtime.event_buffer == 0 {
        config.realtime.event_buffer = 1;
    }

    debug!(
        base_url = %config.api.base_url,
        realtime = config.realtime.enabled,
        "loaded client configuration"
    );
    Ok(config)
}
