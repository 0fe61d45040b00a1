//! Server Configuration

use std::time::Duration;

/// Settings read once at startup
#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Directory holding the compiled web front end
    pub static_dir: String,

    /// Upper bound on one analysis run (None = wait for the pipeline)
    pub analysis_timeout: Option<Duration>,

    /// Used only when the form's model-key field is blank
    pub fallback_openai_key: Option<String>,

    /// Used only when the form's search-key field is blank
    pub fallback_serp_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: "static".into(),
            analysis_timeout: None,
            fallback_openai_key: None,
            fallback_serp_key: None,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .field("analysis_timeout", &self.analysis_timeout)
            .field("fallback_openai_key", &self.fallback_openai_key.as_ref().map(|_| "<redacted>"))
            .field("fallback_serp_key", &self.fallback_serp_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: text("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: text("STATIC_DIR").unwrap_or(defaults.static_dir),
            analysis_timeout: text("ANALYSIS_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            fallback_openai_key: text("OPENAI_API_KEY"),
            fallback_serp_key: text("SERP_API_KEY"),
        }
    }

    /// The form value, or the configured fallback when the field is blank
    pub fn resolve_openai_key(&self, submitted: &str) -> String {
        resolve(submitted, self.fallback_openai_key.as_deref())
    }

    pub fn resolve_serp_key(&self, submitted: &str) -> String {
        resolve(submitted, self.fallback_serp_key.as_deref())
    }
}

fn resolve(submitted: &str, fallback: Option<&str>) -> String {
    match fallback {
        Some(key) if submitted.trim().is_empty() => key.to_string(),
        _ => submitted.to_string(),
    }
}
