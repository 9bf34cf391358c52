use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("model response is empty")]
    EmptyResponse,
    #[error("model response is not valid JSON: {0}")]
    MalformedJson(serde_json::Error),
    #[error("model response does not match the declared schema: {0}")]
    SchemaMismatch(serde_json::Error),
}

/// External generative model: prompt + persona + output shape in, JSON text out.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        response_schema: &Value,
    ) -> Result<String, ModelError>;
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
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

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` REST client
pub struct GeminiService {
    api_key: String,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn with_base_url(
        api_key: String,
        model: String,
        api_base: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiService {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        response_schema: &Value,
    ) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt.to_string() }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system_instruction.to_string() }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);
        log::debug!("📤 Prompt size: {} bytes", prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Gemini API error ({}): {}", status, body);
            return Err(ModelError::Api { status: status.as_u16(), body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply.text();
        log::debug!("📄 Gemini reply text: {} bytes", text.len());

        Ok(text)
    }
}


#[cfg(all(test, feature = "proxy-server"))]
mod http_tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::Router;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default, Clone)]
    struct Seen {
        uri: String,
        api_key: Option<String>,
        body: Option<Value>,
    }

    /// Stub Gemini endpoint answering every request with `status` and `reply`.
    async fn stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let sink = seen.clone();
        let router = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: String| {
            let sink = sink.clone();
            let reply = reply.clone();
            async move {
                *sink.lock().unwrap() = Seen {
                    uri: uri.to_string(),
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_str(&body).ok(),
                };
                (status, axum::Json(reply))
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{}/v1beta", addr), seen)
    }

    fn service(base: String) -> GeminiService {
        GeminiService::with_base_url(
            "test_key".to_string(),
            "gemini-2.5-flash".to_string(),
            base,
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_generate_sends_key_in_header_and_joins_parts() {
        let (base, seen) = stub(
            StatusCode::OK,
            json!({"candidates": [{"content": {"parts": [{"text": "{\"score\": 9"}, {"text": "0, \"comment\": \"좋아요\"}"}]}}]}),
        )
        .await;
        let schema = json!({"type": "OBJECT"});

        let text = service(base)
            .generate("레시피 평가", "너는 영양사야", &schema)
            .await
            .unwrap();

        assert_eq!(text, r#"{"score": 90, "comment": "좋아요"}"#);

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.api_key.as_deref(), Some("test_key"));
        assert_eq!(seen.uri, "/v1beta/models/gemini-2.5-flash:generateContent");
        assert!(!seen.uri.contains("test_key"));
        let body = seen.body.unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "레시피 평가");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "너는 영양사야");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (base, _) = stub(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "API key not valid"}}),
        )
        .await;

        let err = service(base)
            .generate("prompt", "persona", &json!({}))
            .await
            .unwrap_err();

        match err {
            ModelError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reply_without_candidates_yields_empty_text() {
        let (base, _) = stub(StatusCode::OK, json!({"candidates": []})).await;

        let text = service(base)
            .generate("prompt", "persona", &json!({}))
            .await
            .unwrap();

        assert!(text.is_empty());
    }
}
