//! Crew Configuration
//!
//! Endpoint and tuning settings shared by every run. Credentials are not part
//! of this; they arrive with each request.

use agent_core::provider::{GenerationOptions, DEFAULT_MODEL};
use agent_runtime::OpenAiConfig;

/// Lookup service settings
#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Upper bound on text returned to an agent per lookup
    pub max_output_chars: usize,

    /// Related topics kept from a web search
    pub web_max_results: usize,

    /// Pages summarised per encyclopedia lookup
    pub wikipedia_top_k: usize,

    pub duckduckgo_base_url: String,
    pub serpapi_base_url: String,
    pub wikipedia_base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_output_chars: 4000,
            web_max_results: 5,
            wikipedia_top_k: 3,
            duckduckgo_base_url: "https://html.duckduckgo.com".into(),
            serpapi_base_url: "https://serpapi.com".into(),
            wikipedia_base_url: "https://en.wikipedia.org".into(),
        }
    }
}

/// Settings for building executors
#[derive(Clone, Debug)]
pub struct CrewConfig {
    /// Model-service endpoint (key filled in per run)
    pub openai: OpenAiConfig,

    /// Options for every completion call
    pub generation: GenerationOptions,

    /// Reasoning iterations allowed per task
    pub max_iterations: usize,

    pub lookup: LookupConfig,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            generation: GenerationOptions::default(),
            max_iterations: 15,
            lookup: LookupConfig::default(),
        }
    }
}

impl CrewConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let number = |key: &str| {
            text(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
        };

        let generation = GenerationOptions {
            model: text("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            ..defaults.generation
        };

        let lookup = LookupConfig {
            timeout_secs: number("LOOKUP_TIMEOUT_SECS")
                .map_or(defaults.lookup.timeout_secs, |v| v as u64),
            max_output_chars: number("LOOKUP_MAX_CHARS")
                .unwrap_or(defaults.lookup.max_output_chars),
            duckduckgo_base_url: text("DUCKDUCKGO_BASE_URL")
                .unwrap_or(defaults.lookup.duckduckgo_base_url),
            serpapi_base_url: text("SERPAPI_BASE_URL")
                .unwrap_or(defaults.lookup.serpapi_base_url),
            wikipedia_base_url: text("WIKIPEDIA_BASE_URL")
                .unwrap_or(defaults.lookup.wikipedia_base_url),
            ..defaults.lookup
        };

        Self {
            openai: OpenAiConfig::from_vars(&var),
            generation,
            max_iterations: number("CREW_MAX_ITERATIONS").unwrap_or(defaults.max_iterations),
            lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_model_settings() {
        let config = CrewConfig::default();
        assert_eq!(config.generation.model, "gpt-4-turbo-preview");
        assert_eq!(config.generation.temperature, 0.0);
        assert_eq!(config.generation.max_tokens, 2000);
        assert_eq!(config.lookup.max_output_chars, 4000);
        assert_eq!(config.lookup.wikipedia_top_k, 3);
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = CrewConfig::from_vars(|key| match key {
            "OPENAI_MODEL" => Some("gpt-4o".into()),
            "CREW_MAX_ITERATIONS" => Some("4".into()),
            "LOOKUP_MAX_CHARS" => Some("1200".into()),
            "WIKIPEDIA_BASE_URL" => Some("http://127.0.0.1:9000".into()),
            "OPENAI_BASE_URL" => Some("http://127.0.0.1:9001/v1".into()),
            _ => None,
        });

        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.generation.max_tokens, 2000);
        assert_eq!(config.max_iterations, 4);
        assert_eq!(config.lookup.max_output_chars, 1200);
        assert_eq!(config.lookup.wikipedia_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.openai.base_url, "http://127.0.0.1:9001/v1");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = CrewConfig::from_vars(|key| match key {
            "LOOKUP_TIMEOUT_SECS" => Some("soon".into()),
            "OPENAI_MODEL" => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.lookup.timeout_secs, 30);
        assert_eq!(config.generation.model, "gpt-4-turbo-preview");
    }

    #[test]
    fn test_zero_limits_fall_back() {
        let config = CrewConfig::from_vars(|key| match key {
            "CREW_MAX_ITERATIONS" | "LOOKUP_MAX_CHARS" | "LOOKUP_TIMEOUT_SECS" | "OPENAI_TIMEOUT_SECS" => {
                Some("0".into())
            }
            _ => None,
        });
        assert_eq!(config.max_iterations, 15);
        assert_eq!(config.lookup.max_output_chars, 4000);
        assert_eq!(config.lookup.timeout_secs, 30);
        assert_eq!(config.openai.timeout_secs, 120);
    }
}
