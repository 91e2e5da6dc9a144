//! Google Gemini implementation of [`AiGateway`].
//!
//! Every operation is one `generateContent` call with JSON output constrained by
//! a response schema. The first candidate's text is decoded as the operation's
//! result type.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::error::{AiError, AiOperation};
use crate::gateway::AiGateway;
use crate::prompts;
use crate::snapshot::PantrySnapshot;
use crate::types::{CategorizedItem, ReceiptImage, Recipe, ScannedItem};

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// Gateway Implementation
// ============================================================================

/// Gateway backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiGateway {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at another endpoint (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// One round trip. The error string is the cause, for logs.
    async fn generate<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        schema: Value,
    ) -> Result<T, String> {
        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        debug!(model = %self.model, "sending request to Gemini API");

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;

        if !status.is_success() {
            return Err(Self::api_error_message(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| format!("failed to parse Gemini response: {e}"))?;

        if let Some(err) = parsed.error {
            return Err(format!("Gemini API error: {}", err.message));
        }

        let text = Self::first_text(parsed)
            .ok_or_else(|| "no content in Gemini response".to_string())?;

        serde_json::from_str(text.trim()).map_err(|e| format!("model returned malformed JSON: {e}"))
    }

    fn first_text(response: GenerateResponse) -> Option<String> {
        response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }

    fn api_error_message(status: u16, body: &str) -> String {
        let message = serde_json::from_str::<GenerateResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_owned(), |e| e.message);
        format!("Gemini API error ({status}): {message}")
    }

    fn fail(op: AiOperation, cause: String) -> AiError {
        error!(operation = op.as_str(), %cause, "Gemini request failed");
        op.failure(cause)
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, pantry), fields(model = %self.model, items = pantry.len()))]
    async fn suggest_recipes(&self, pantry: &PantrySnapshot) -> Result<Vec<Recipe>, AiError> {
        let parts = vec![Part::Text {
            text: prompts::recipe_prompt(pantry),
        }];
        self.generate(parts, prompts::recipe_schema())
            .await
            .map_err(|cause| Self::fail(AiOperation::SuggestRecipes, cause))
    }

    #[instrument(
        skip(self, image),
        fields(model = %self.model, media_type = %image.media_type(), bytes = image.bytes().len())
    )]
    async fn parse_receipt(&self, image: &ReceiptImage) -> Result<Vec<ScannedItem>, AiError> {
        let parts = vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.media_type().to_owned(),
                    data: image.to_base64(),
                },
            },
            Part::Text {
                text: prompts::RECEIPT_PROMPT.to_owned(),
            },
        ];
        self.generate(parts, prompts::scanned_items_schema())
            .await
            .map_err(|cause| Self::fail(AiOperation::ParseReceipt, cause))
    }

    #[instrument(skip(self, names), fields(model = %self.model, names = names.len()))]
    async fn categorize_items(&self, names: &[String]) -> Result<Vec<CategorizedItem>, AiError> {
        let parts = vec![Part::Text {
            text: prompts::categorize_prompt(names),
        }];
        let categorized: Vec<CategorizedItem> = self
            .generate(parts, prompts::categories_schema())
            .await
            .map_err(|cause| Self::fail(AiOperation::CategorizeItems, cause))?;

        if categorized.len() != names.len() {
            warn!(
                expected = names.len(),
                received = categorized.len(),
                "model did not categorize every item exactly once"
            );
        }
        Ok(categorized)
    }
}

impl core::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
