//! Gemini client — the single point of entry for all generative-language
//! calls in talentlens.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini REST API
//! directly. All model interactions MUST go through this module.
//!
//! Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all calls in talentlens.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,
}

/// One unit of request payload: instructional text, or raw file bytes tagged
/// with a media type (sent base64-encoded as Gemini `inlineData`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn file(content_type: impl Into<String>, bytes: &Bytes) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: content_type.into(),
                data: BASE64.encode(bytes),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
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
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first text part, if any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client used by the analysis backend.
/// Wraps the `generateContent` REST endpoint with retry logic and a
/// structured-output helper.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw `generateContent` call with ordered content parts, an
    /// optional system instruction, and an optional strict response schema.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn generate(
        &self,
        parts: Vec<Part>,
        system: Option<&str>,
        response_schema: Option<Value>,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let request_body = GenerateContentRequest {
            system_instruction: system.map(|text| Content {
                parts: vec![Part::text(text)],
            }),
            contents: vec![Content { parts }],
            generation_config: response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent?key={}", self.api_key);
        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GatewayError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(GatewayError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let gemini_response: GenerateContentResponse = response.json().await?;

            if let Some(usage) = &gemini_response.usage_metadata {
                debug!(
                    "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(gemini_response);
        }

        Err(last_error.unwrap_or(GatewayError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Free-text call: single user prompt, no schema constraint.
    /// Returns the response text trimmed of surrounding whitespace.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self.generate(vec![Part::text(prompt)], None, None).await?;
        let text = response.text().ok_or(GatewayError::EmptyContent)?.trim();
        if text.is_empty() {
            return Err(GatewayError::EmptyContent);
        }
        Ok(text.to_string())
    }

    /// Structured call: the schema constraint is passed to the service and
    /// the returned text is parsed as JSON into `T`.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        system: &str,
        response_schema: Value,
    ) -> Result<T, GatewayError> {
        let response = self
            .generate(parts, Some(system), Some(response_schema))
            .await?;

        let text = response.text().ok_or(GatewayError::EmptyContent)?;

        // The schema constraint should keep the output bare JSON, but strip
        // markdown code fences in case the model wraps it anyway.
        let text = strip_code_fences(text);

        serde_json::from_str(text).map_err(GatewayError::Parse)
    }
}

/// Strips a surrounding ```json ... ``` or ``` ... ``` fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_file_part_serializes_as_inline_data() {
        let part = Part::file("application/pdf", &Bytes::from_static(b"%PDF-1.4"));
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "application/pdf");
        // "%PDF-1.4" base64-encoded
        assert_eq!(json["inlineData"]["data"], "JVBERi0xLjQ=");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            system_instruction: Some(Content {
                parts: vec![Part::text("act as an HR analyst")],
            }),
            contents: vec![Content {
                parts: vec![Part::text("Here is the job description:")],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: serde_json::json!({"type": "OBJECT"}),
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "act as an HR analyst"
        );
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Here is the job description:");
    }

    #[test]
    fn test_response_text_picks_first_text_part() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "hello"}, {"text": "ignored"}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }
}
