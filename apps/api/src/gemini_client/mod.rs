// Gemini Client — the single point of entry for generative-AI calls.
//
// No other module talks to the Gemini API directly; job search goes through
// `GeminiClient::generate_json`.
//
// Calls are made once. Failures are reported to the caller, never retried.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gemini returned no text content")]
    EmptyContent,
}

/// Options for one `generateContent` call.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub system: Option<String>,
    /// Ground the answer with Google Search results.
    pub google_search: bool,
    /// Constrain output to JSON matching this OpenAPI-style schema.
    pub response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts, if it has any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
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

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes one raw `generateContent` call and returns the full response.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerateResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        let request_body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![RequestPart { text: prompt }],
            }],
            system_instruction: options.system.as_deref().map(|text| Content {
                role: None,
                parts: vec![RequestPart { text }],
            }),
            tools: if options.google_search {
                vec![serde_json::json!({ "google_search": {} })]
            } else {
                Vec::new()
            },
            generation_config: options
                .response_schema
                .as_ref()
                .map(|schema| GenerationConfig {
                    response_mime_type: "application/json",
                    response_schema: schema,
                }),
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(generated)
    }

    /// Calls the model and deserializes the text response as JSON.
    /// A response without text is an error, never a default value.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<T, GeminiError> {
        let response = self.generate(prompt, options).await?;
        parse_json_text(&response)
    }
}

pub(crate) fn parse_json_text<T: DeserializeOwned>(
    response: &GenerateResponse,
) -> Result<T, GeminiError> {
    let text = response.text().ok_or(GeminiError::EmptyContent)?;
    serde_json::from_str(strip_json_fences(&text)).map_err(GeminiError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[{\"key\": \"value\"}]\n```";
        assert_eq!(strip_json_fences(input), "[{\"key\": \"value\"}]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "[]";
        assert_eq!(strip_json_fences(input), "[]");
    }

    #[test]
    fn test_text_joins_parts_of_first_candidate() {
        let r = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "[{\"a\":"}, {"text": "1}]"}]}}]}"#,
        );
        assert_eq!(r.text().as_deref(), Some("[{\"a\":1}]"));
    }

    #[test]
    fn test_missing_text_is_empty_content_error() {
        let r = response(r#"{"candidates": [{"content": {"parts": [{}]}}]}"#);
        let result: Result<Vec<Value>, _> = parse_json_text(&r);
        assert!(matches!(result, Err(GeminiError::EmptyContent)));

        let r = response(r#"{"candidates": []}"#);
        let result: Result<Vec<Value>, _> = parse_json_text(&r);
        assert!(matches!(result, Err(GeminiError::EmptyContent)));
    }

    #[test]
    fn test_unparseable_text_is_parse_error() {
        let r = response(r#"{"candidates": [{"content": {"parts": [{"text": "no jobs, sorry"}]}}]}"#);
        let result: Result<Vec<Value>, _> = parse_json_text(&r);
        assert!(matches!(result, Err(GeminiError::Parse(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let schema = serde_json::json!({ "type": "ARRAY" });
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![RequestPart { text: "find jobs" }],
            }],
            system_instruction: None,
            tools: vec![serde_json::json!({ "google_search": {} })],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "find jobs");
        assert!(json.get("systemInstruction").is_none());
        assert_eq!(json["tools"][0], serde_json::json!({ "google_search": {} }));
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_sending() {
        let client = GeminiClient::new(None);
        let result = client.generate("hi", &GenerateOptions::default()).await;
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }
}
