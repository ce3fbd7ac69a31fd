//! Narrative text generation backed by Gemini
//!
//! The planner works without this service: a missing API key, a timeout, an
//! HTTP failure or a malformed body all produce an empty string, and callers
//! render a deterministic default instead. Requests carry a fixed timeout and
//! a single retry so plan computation is never blocked indefinitely.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const NARRATIVE_TIMEOUT_SECS: u64 = 10;
const RETRY_DELAY_MS: u64 = 250;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Clone)]
pub struct NarrativeService {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl NarrativeService {
    /// Service configured from `GOOGLE_API_KEY` / `GEMINI_API_KEY` and
    /// `GEMINI_MODEL`. Without a key every generation yields an empty string.
    pub fn new() -> Self {
        let api_key = env::var("GOOGLE_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok();
        if api_key.is_none() {
            println!("NarrativeService: no Gemini API key set, narratives disabled");
        }

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(NARRATIVE_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key,
            model,
        }
    }

    /// Service that never calls out; every generation is empty.
    pub fn disabled() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Generate free text for a prompt. Empty string on any failure.
    pub async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => return String::new(),
        };

        for attempt in 0..2 {
            match self
                .request_once(&api_key, prompt, max_tokens, temperature)
                .await
            {
                Ok(text) => return text,
                Err(err) => {
                    eprintln!("Narrative generation failed (attempt {}): {}", attempt + 1, err);
                    if attempt == 0 {
                        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                    }
                }
            }
        }

        String::new()
    }

    async fn request_once(
        &self,
        api_key: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_ENDPOINT, self.model, api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
            },
        };

        let response = self.http_client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("Gemini returned status {}", status).into());
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text.trim().to_string())
    }
}

impl Default for NarrativeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_disabled_service_yields_empty_text() {
        let service = NarrativeService::disabled();
        let text = service.generate("Describe a day in Manaus.", 150, 0.9).await;
        assert!(text.is_empty());
    }

    #[test]
    fn test_response_parsing_tolerates_missing_fields() {
        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.candidates.is_none());

        let partial: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"olá"}]}},{}]}"#)
                .unwrap();
        let texts: Vec<String> = partial
            .candidates
            .unwrap()
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["olá".to_string()]);
    }
}
