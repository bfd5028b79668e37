//! Address parsing through the Gemini `generateContent` API.
//!
//! [`GeminiParser`] (feature `gemini`) sends the extraction prompt and
//! response schema from [`crate::normalize`] and decodes the reply.
//! [`ReplayParser`] runs a previously captured reply through the same
//! decoding path without touching the network.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
#[cfg(feature = "gemini")]
use serde::Serialize;

use crate::address::{Address, DEFAULT_COUNTRY};
use crate::normalize::{AddressParser, address_from_response, ensure_input};
#[cfg(feature = "gemini")]
use crate::normalize::{build_prompt, response_schema};
use crate::{LabelError, Result};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent as `x-goog-api-key`.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Base URL; the request goes to `{endpoint}/v1beta/models/{model}:generateContent`.
    pub endpoint: String,
    /// Country used when the text does not make one clear.
    pub default_country: String,
    /// Request timeout in seconds. `None` waits as long as the transport does.
    pub timeout: Option<u64>,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_country: DEFAULT_COUNTRY.to_string(),
            timeout: None,
            user_agent: format!("shiplabel/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[cfg(feature = "gemini")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[cfg(feature = "gemini")]
impl GenerateContentRequest {
    fn for_address(input: &str, default_country: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: build_prompt(input, default_country) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(default_country),
            },
        }
    }
}

/// The parts of a `generateContent` reply that matter here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when there is nothing in it.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Pulls the model's text out of a raw `generateContent` response body.
///
/// A body that is not a `generateContent` response is a
/// [`LabelError::MalformedResponse`]; one with no candidate text is a
/// [`LabelError::EmptyResponse`].
pub fn decode_generate_content(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;
    match response.text() {
        Some(text) => Ok(text),
        None => {
            let reason = response.candidates.first().and_then(|c| c.finish_reason.as_deref());
            tracing::debug!(finish_reason = ?reason, "generateContent returned no text");
            Err(LabelError::EmptyResponse)
        }
    }
}

/// Parses addresses by calling the Gemini API.
#[cfg(feature = "gemini")]
#[derive(Debug, Clone)]
pub struct GeminiParser {
    config: GeminiConfig,
    url: url::Url,
    client: reqwest::Client,
}

#[cfg(feature = "gemini")]
impl GeminiParser {
    /// Creates a parser, validating the key and endpoint up front.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LabelError::MissingApiKey);
        }

        let url = request_url(&config.endpoint, &config.model)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, url, client })
    }

    /// The settings this parser was built with.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Full `generateContent` URL requests go to.
    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

#[cfg(feature = "gemini")]
fn request_url(endpoint: &str, model: &str) -> Result<url::Url> {
    let mut base = url::Url::parse(endpoint).map_err(|e| LabelError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(LabelError::InvalidEndpoint(format!("{endpoint}: must be an http(s) URL")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| LabelError::InvalidEndpoint(e.to_string()))
}

#[cfg(feature = "gemini")]
#[async_trait]
impl AddressParser for GeminiParser {
    async fn parse_address(&self, input: &str) -> Result<Address> {
        let input = ensure_input(input)?;
        let request = GenerateContentRequest::for_address(input, &self.config.default_country);

        tracing::debug!(model = %self.config.model, chars = input.len(), "requesting address parse");

        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LabelError::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status, truncate(&body, 200)),
            });
        }

        let text = decode_generate_content(&body)?;
        tracing::debug!(bytes = text.len(), "address parse response received");
        address_from_response(&text, input, &self.config.default_country)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(feature = "gemini")]
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Replays a captured `generateContent` response body instead of calling out.
#[derive(Debug, Clone)]
pub struct ReplayParser {
    body: String,
    default_country: String,
}

impl ReplayParser {
    pub fn new(body: impl Into<String>, default_country: impl Into<String>) -> Self {
        Self { body: body.into(), default_country: default_country.into() }
    }

    /// Reads the response body from a file.
    pub fn from_file(path: impl AsRef<Path>, default_country: impl Into<String>) -> Result<Self> {
        let body = fs::read_to_string(path)?;
        Ok(Self::new(body, default_country))
    }
}

#[async_trait]
impl AddressParser for ReplayParser {
    async fn parse_address(&self, input: &str) -> Result<Address> {
        let input = ensure_input(input)?;
        let text = decode_generate_content(&self.body)?;
        address_from_response(&text, input, &self.default_country)
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}
