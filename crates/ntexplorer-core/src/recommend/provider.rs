//! The recommendation collaborator and its Gemini implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::request::{GeoLocation, RecommendationRequest};
use crate::error::RecommendError;
use crate::storage::GeminiConfig;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Anything that can turn a prompt (plus an optional location hint) into raw
/// reply text. Parsing the reply is not the provider's job.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Identifier used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Single attempt; no retries.
    async fn generate(&self, request: &RecommendationRequest) -> Result<String, RecommendError>;
}

/// Google Gemini `generateContent` with Google Maps grounding.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Build from the `[gemini]` config section; the API key may also come
    /// from the environment.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, RecommendError> {
        let api_key = config.resolved_api_key().ok_or(RecommendError::MissingApiKey)?;
        Ok(Self::new(api_key)
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> Result<Url, RecommendError> {
        let invalid = |message: String| RecommendError::Transport {
            message,
            source: None,
        };
        let method = format!("{}:generateContent", self.model);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("invalid base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl RecommendationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &RecommendationRequest) -> Result<String, RecommendError> {
        if self.api_key.is_empty() {
            return Err(RecommendError::MissingApiKey);
        }

        let url = self.endpoint()?;
        tracing::debug!(
            model = %self.model,
            has_location = request.location.is_some(),
            "requesting recommendations"
        );

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(status = status.as_u16(), error = %e, "failed to read error body");
                String::new()
            });
            return Err(RecommendError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        Ok(reply.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMaps,
}

#[derive(Debug, Serialize)]
struct GoogleMaps {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: GeoLocation,
}

fn request_body(request: &RecommendationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: &request.prompt,
            }],
        }],
        tools: vec![Tool {
            google_maps: GoogleMaps {},
        }],
        tool_config: request.location.map(|lat_lng| ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng },
        }),
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated; empty if there are none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::UserPreferences;
    use crate::recommend::request::build_request;
    use serde_json::json;

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    #[test]
    fn body_without_location_has_no_tool_config() {
        let req = build_request(&UserPreferences::reset(), None);
        let body = serde_json::to_value(request_body(&req)).unwrap();
        assert_eq!(body["tools"], json!([{ "googleMaps": {} }]));
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], req.prompt.as_str());
        assert!(body.get("toolConfig").is_none());
    }

    #[test]
    fn body_with_location_carries_lat_lng() {
        let req = build_request(
            &UserPreferences::reset(),
            Some(GeoLocation::new(25.0478, 121.5319)),
        );
        let body = serde_json::to_value(request_body(&req)).unwrap();
        assert_eq!(
            body["toolConfig"]["retrievalConfig"]["latLng"],
            json!({ "latitude": 25.0478, "longitude": 121.5319 })
        );
    }

    #[test]
    fn endpoint_appends_model_path() {
        let provider = GeminiProvider::new("k").with_base_url("http://localhost:8080/");
        assert_eq!(
            provider.endpoint().unwrap().as_str(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn joins_text_parts_of_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .match_header("x-goog-api-key", "test-key")
            .match_body(mockito::Matcher::PartialJson(
                json!({ "tools": [{ "googleMaps": {} }] }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [
                        { "content": { "parts": [{ "text": "Sure:\n[" }, { "text": "]" }] } },
                        { "content": { "parts": [{ "text": "ignored" }] } }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = GeminiProvider::new("test-key").with_base_url(server.url());
        let req = build_request(&UserPreferences::reset(), None);
        let text = provider.generate(&req).await.unwrap();

        assert_eq!(text, "Sure:\n[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_candidates_yield_empty_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", ENDPOINT)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let provider = GeminiProvider::new("k").with_base_url(server.url());
        let req = build_request(&UserPreferences::reset(), None);
        assert_eq!(provider.generate(&req).await.unwrap(), "");
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", ENDPOINT)
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let provider = GeminiProvider::new("k").with_base_url(server.url());
        let req = build_request(&UserPreferences::reset(), None);
        let err = provider.generate(&req).await.unwrap_err();

        assert!(matches!(
            err,
            RecommendError::Http { status: 429, ref body } if body == "quota exceeded"
        ));
        assert!(!err.is_malformed());
    }

    #[tokio::test]
    async fn broken_error_body_still_reports_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", ENDPOINT)
            .with_status(500)
            .with_chunked_body(|w| {
                std::io::Write::write_all(w, b"partial")?;
                Err(std::io::Error::other("connection dropped"))
            })
            .create_async()
            .await;

        let provider = GeminiProvider::new("k").with_base_url(server.url());
        let req = build_request(&UserPreferences::reset(), None);
        let err = provider.generate(&req).await.unwrap_err();
        assert!(matches!(err, RecommendError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let provider = GeminiProvider::new("").with_base_url("http://127.0.0.1:1");
        let req = build_request(&UserPreferences::reset(), None);
        assert!(matches!(
            provider.generate(&req).await,
            Err(RecommendError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let provider = GeminiProvider::new("k").with_base_url("http://127.0.0.1:1");
        let req = build_request(&UserPreferences::reset(), None);
        assert!(matches!(
            provider.generate(&req).await,
            Err(RecommendError::Transport { .. })
        ));
    }
}
