use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::common::AiBackend;
use crate::constants::GEMINI_API_BASE;
use crate::settings::ModelConfig;

/// Gemini generateContent request structure
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// Content block for a Gemini API request.
#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Text part within a Gemini content block.
#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,
}

/// Response from the Gemini API.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: String,
}

pub struct GeminiBackend {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    api_key: String,
    model_name: String,
    temperature: f64,
}

impl GeminiBackend {
    pub fn new(api_key: String, model_config: &ModelConfig) -> Result<Self> {
        info!(
            "Creating Gemini backend for model {} (temperature {:.2})",
            model_config.model_name, model_config.temperature
        );
        Ok(Self {
            client: reqwest::Client::new(),
            runtime: tokio::runtime::Runtime::new()?,
            api_key,
            model_name: model_config.model_name.clone(),
            temperature: model_config.temperature,
        })
    }

    fn build_request(&self, system_instruction: &str, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

impl AiBackend for GeminiBackend {
    fn invoke(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model_name, self.api_key
        );
        let request = self.build_request(system_instruction, prompt);

        self.runtime.block_on(async {
            let response = self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                return Err(anyhow!("Gemini API error ({status}): {body}"));
            }

            debug!("Response received, parsing candidates");
            let response: GenerateContentResponse = response.json().await?;
            let text = response
                .candidates
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no candidates in Gemini response"))?
                .content
                .parts
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no parts in Gemini response candidate"))?
                .text;
            Ok(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_names() {
        let request = GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: "be terse".to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part {
                    text: "define halite".to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let json: serde_json::Value = serde_json::from_str(
            &serde_json::to_string(&request).expect("request should serialize"),
        )
        .expect("request json should parse");

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "be terse"
        );
        assert_eq!(json["contents"][0]["parts"][0]["text"], "define halite");
        assert_eq!(json["generationConfig"]["temperature"], 0.0);
    }

    #[test]
    fn response_parses_first_candidate_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Halite is a mineral that ..."}]}}
            ]
        }"#;
        let response: GenerateContentResponse =
            serde_json::from_str(raw).expect("response should parse");
        assert_eq!(
            response.candidates[0].content.parts[0].text,
            "Halite is a mineral that ..."
        );
    }
}
