//! Configuration types for the gateway.
//!
//! All configuration is loaded from environment variables (a `.env` file is
//! read first by the binary, if present). The gateway needs to know where to
//! listen, which provider to relay prompts to, and which browser origins may
//! call it.

use crate::error::ConfigError;

/// Default Groq API base URL (OpenAI-compatible).
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
/// Default Groq model.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-70b-versatile";
/// Default Generative Language API base URL.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
/// Origins allowed when `CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://cyberpinnacle.vercel.app";

/// Complete gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host address to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Provider that answers chat prompts.
    pub provider: ProviderConfig,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

/// Configuration for the selected provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Which provider API to speak.
    pub kind: ProviderKind,
    /// Base API URL, without a trailing slash.
    pub api_url: String,
    /// API key. Never logged.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

impl core::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Supported provider APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Groq chat completions (OpenAI-compatible request format).
    Groq,
    /// Google Generative Language `generateContent`.
    Gemini,
}

impl ProviderKind {
    /// Environment variable prefix for this provider's settings.
    const fn env_prefix(self) -> &'static str {
        match self {
            Self::Groq => "GROQ",
            Self::Gemini => "GEMINI",
        }
    }

    const fn defaults(self) -> (&'static str, &'static str) {
        match self {
            Self::Groq => (DEFAULT_GROQ_API_URL, DEFAULT_GROQ_MODEL),
            Self::Gemini => (DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL),
        }
    }
}

impl core::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" | "openai" => Ok(Self::Groq),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(ConfigError::Invalid {
                name: String::from("LLM_PROVIDER"),
                reason: format!("unknown provider: {other}"),
            }),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// Variables:
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- listen port (default `5000`)
    /// - `LLM_PROVIDER` -- `groq` (default) or `gemini`
    /// - `{GROQ,GEMINI}_API_KEY` -- required for the selected provider
    /// - `{GROQ,GEMINI}_API_URL` -- base URL override
    /// - `{GROQ,GEMINI}_MODEL` -- model override
    /// - `CORS_ORIGINS` -- comma-separated allowed origins
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| String::from("0.0.0.0"));

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: String::from("PORT"),
                reason: e.to_string(),
            })?,
            None => 5000,
        };

        let kind = match lookup("LLM_PROVIDER") {
            Some(raw) => raw.parse::<ProviderKind>()?,
            None => ProviderKind::Groq,
        };
        let provider = load_provider_config(kind, &lookup)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        Ok(Self {
            host,
            port,
            provider,
            cors_origins,
        })
    }
}

/// Load the settings for one provider from its prefixed variables.
fn load_provider_config<F>(kind: ProviderKind, lookup: &F) -> Result<ProviderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = kind.env_prefix();
    let (default_url, default_model) = kind.defaults();

    let key_var = format!("{prefix}_API_KEY");
    let api_key = lookup(&key_var)
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::Missing(key_var))?;

    let api_url = lookup(&format!("{prefix}_API_URL"))
        .unwrap_or_else(|| default_url.to_owned())
        .trim_end_matches('/')
        .to_owned();
    let model = lookup(&format!("{prefix}_MODEL")).unwrap_or_else(|| default_model.to_owned());

    Ok(ProviderConfig {
        kind,
        api_url,
        api_key,
        model,
    })
}
