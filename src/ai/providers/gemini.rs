// src/ai/providers/gemini.rs
use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::json;

/// Google Gemini Content API (generateContent)
pub struct GeminiProvider {
    api_key: String,
    url: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            url: url.to_string(),
        }
    }
}

impl super::AiProvider for GeminiProvider {
    fn chat(
        &self,
        client: &Client,
        system: &str,
        prompt: &str,
        model_name: &str,
        _schema: &serde_json::Value,
    ) -> Result<String> {
        let url = if self.url.contains("generateContent") {
            self.url.clone()
        } else {
            format!(
                "{}/v1beta/models/{}:generateContent",
                self.url.trim_end_matches('/'),
                model_name
            )
        };

        let response = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&json!({
                "systemInstruction": {"parts": [{"text": system}]},
                "contents": [{"parts": [{"text": prompt}]}],
                "generationConfig": {"responseMimeType": "application/json"}
            }))
            .send()?;

        let status = response.status();
        let body_text = response.text()?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Error de API Gemini (Status {}): {}",
                status,
                body_text
            ));
        }

        let body: serde_json::Value = serde_json::from_str(&body_text)?;
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Estructura de Gemini inesperada. Body: {}", body_text))
    }
}
