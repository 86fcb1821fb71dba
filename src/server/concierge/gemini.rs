//! Minimal client for the Gemini `generateContent` endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::server::error::gemini::GeminiError;

const TEMPERATURE: f32 = 0.6;
const TOP_K: u32 = 32;
const TOP_P: f32 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Sends single-turn prompts to a Gemini model.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for `{base_url}/v1beta/models/{model}:generateContent`.
    pub fn new(
        http: Client,
        base_url: &str,
        model: &str,
        api_key: String,
    ) -> Result<Self, GeminiError> {
        let endpoint = Url::parse(base_url)?
            .join(&format!("v1beta/models/{}:generateContent", model))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    /// Returns the text of the first part of the first candidate.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GeminiError::EmptyResponse)
    }
}
