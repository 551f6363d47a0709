//! Provider abstraction and implementations.
//!
//! A provider does one thing: generate text from a prompt. Enum dispatch is
//! used instead of a trait object because async methods are not
//! dyn-compatible. Concrete implementations exist for Groq (OpenAI-compatible
//! chat completions) and Google's Generative Language API, both over HTTP
//! via `reqwest`.
//!
//! Text extraction is best-effort: a well-formed response that lacks the
//! expected field yields [`NO_RESPONSE`] instead of an error. Transport
//! failures, non-success statuses and undecodable bodies are errors.

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::ProviderError;

/// Returned when the provider's response carries no text.
pub const NO_RESPONSE: &str = "No response";

/// Sampling temperature sent with chat completion requests.
const TEMPERATURE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Unified provider enum
// ---------------------------------------------------------------------------

/// A provider that can turn a prompt into generated text.
pub enum LlmProvider {
    /// Groq chat completions.
    Groq(GroqProvider),
    /// Gemini `generateContent`.
    Gemini(GeminiProvider),
}

impl LlmProvider {
    /// Send a prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the request fails, the provider
    /// answers with a non-success status, or the body is not JSON.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Self::Groq(provider) => provider.generate(prompt).await,
            Self::Gemini(provider) => provider.generate(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Groq(_) => GroqProvider::NAME,
            Self::Gemini(_) => GeminiProvider::NAME,
        }
    }

    /// Model the provider sends prompts to.
    pub fn model(&self) -> &str {
        match self {
            Self::Groq(p) => &p.model,
            Self::Gemini(p) => &p.model,
        }
    }
}

// ---------------------------------------------------------------------------
// Groq
// ---------------------------------------------------------------------------

/// Groq's OpenAI-compatible chat completions API.
///
/// Sends requests to `{api_url}/chat/completions` with bearer auth.
pub struct GroqProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GroqProvider {
    const NAME: &'static str = "groq";

    /// Create a Groq provider.
    pub fn new(config: &ProviderConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE,
        });

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body);

        let json = send_json(Self::NAME, request).await?;
        Ok(extract_groq_text(&json).unwrap_or(NO_RESPONSE).to_owned())
    }
}

/// Pull `choices[0].message.content` out of a chat completions response.
fn extract_groq_text(json: &serde_json::Value) -> Option<&str> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

/// Google's Generative Language API.
///
/// The key travels as a query parameter and the prompt is wrapped in a
/// `contents[].parts[]` envelope; the text comes back under
/// `candidates[0].content.parts[0].text`.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    const NAME: &'static str = "gemini";

    /// Create a Gemini provider.
    pub fn new(config: &ProviderConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let body = serde_json::json!({
            "contents": [
                {"parts": [{"text": prompt}]}
            ]
        });

        let request = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body);

        let json = send_json(Self::NAME, request).await?;
        Ok(extract_gemini_text(&json).unwrap_or(NO_RESPONSE).to_owned())
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a `generateContent` response.
fn extract_gemini_text(json: &serde_json::Value) -> Option<&str> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Send a request and decode a JSON body, mapping every failure mode.
async fn send_json(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<serde_json::Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| ProviderError::Decode { provider, source })
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create the provider selected by configuration.
pub fn create_provider(config: &ProviderConfig) -> LlmProvider {
    let client = reqwest::Client::new();
    match config.kind {
        ProviderKind::Groq => LlmProvider::Groq(GroqProvider::new(config, client)),
        ProviderKind::Gemini => LlmProvider::Gemini(GeminiProvider::new(config, client)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_groq_text_valid() {
        let json = serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Use nmap -sV for service detection."}
            }]
        });
        assert_eq!(
            extract_groq_text(&json),
            Some("Use nmap -sV for service detection.")
        );
    }

    #[test]
    fn extract_groq_text_missing_choices() {
        let json = serde_json::json!({"choices": []});
        assert_eq!(extract_groq_text(&json), None);
    }

    #[test]
    fn extract_gemini_text_valid() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Phishing relies on pretexting."}]}
            }]
        });
        assert_eq!(extract_gemini_text(&json), Some("Phishing relies on pretexting."));
    }

    #[test]
    fn extract_gemini_text_blocked_prompt() {
        // Safety-blocked prompts come back with feedback and no candidates.
        let json = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert_eq!(extract_gemini_text(&json), None);
    }

    #[test]
    fn create_provider_dispatches_correctly() {
        let mut config = ProviderConfig {
            kind: ProviderKind::Groq,
            api_url: "http://127.0.0.1:1".to_owned(),
            api_key: "test".to_owned(),
            model: "llama".to_owned(),
        };
        let provider = create_provider(&config);
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), "llama");

        config.kind = ProviderKind::Gemini;
        let provider = create_provider(&config);
        assert_eq!(provider.name(), "gemini");
    }
}
