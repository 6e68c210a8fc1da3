use std::time::Duration;

/// Engine-level constants
pub const ENGINE_NAME: &str = "Aura";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted for the upstream API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;
const DEFAULT_NARRATOR_STEP_MS: u64 = 1200;
const DEFAULT_OUTPUT_LANGUAGE: &str = "Chinese (中文)";

/// Runtime configuration for the research engine.
///
/// Defaults come from the environment where it makes sense (the API key)
/// and from compiled-in constants otherwise. Callers embedding the engine
/// can override any field before handing the config to the client.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the generative language API.
    pub api_base_url: String,
    /// API key; `None` makes the client fail fast with a configuration
    /// error instead of sending an unauthenticated request.
    pub api_key: Option<String>,
    /// Model identifier appended to the generateContent path.
    pub model: String,
    /// Whole-request timeout. Grounded generation of a full report
    /// routinely runs well over a minute.
    pub request_timeout_secs: u64,
    /// Language the report's free-text fields are requested in.
    pub output_language: String,
    /// Cadence of the cosmetic progress narrator.
    pub narrator_step_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: DEFAULT_MODEL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            output_language: DEFAULT_OUTPUT_LANGUAGE.to_owned(),
            narrator_step_ms: DEFAULT_NARRATOR_STEP_MS,
        }
    }
}

impl EngineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn narrator_step(&self) -> Duration {
        Duration::from_millis(self.narrator_step_ms)
    }
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise logs the engine at debug and
/// everything else at info. Safe to call once per process.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,aura_engine=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_name_is_aura() {
        assert_eq!(ENGINE_NAME, "Aura");
    }

    #[test]
    fn engine_version_matches_cargo() {
        assert_eq!(ENGINE_VERSION, "0.3.0");
    }

    #[test]
    fn defaults_point_at_flash_model() {
        let config = EngineConfig {
            api_key: None,
            ..Default::default()
        };
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.api_base_url.starts_with("https://"));
        assert_eq!(config.request_timeout(), Duration::from_secs(180));
        assert_eq!(config.narrator_step(), Duration::from_millis(1200));
    }

    #[test]
    fn default_output_language_is_chinese() {
        let config = EngineConfig {
            api_key: None,
            ..Default::default()
        };
        assert!(config.output_language.contains("中文"));
    }
}
