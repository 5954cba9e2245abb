// src/ai/providers/anthropic.rs
use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::json;

pub struct AnthropicProvider {
    api_key: String,
    url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            url: url.to_string(),
        }
    }
}

impl super::AiProvider for AnthropicProvider {
    fn chat(
        &self,
        client: &Client,
        system: &str,
        prompt: &str,
        model_name: &str,
        _schema: &serde_json::Value,
    ) -> Result<String> {
        let base = self.url.trim_end_matches('/');
        let url = if base.ends_with("/v1") {
            format!("{}/messages", base)
        } else {
            format!("{}/v1/messages", base)
        };

        let response = client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&json!({
                "model": model_name,
                "max_tokens": 4096,
                "system": system,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()?;

        let status = response.status();
        let body_text = response.text()?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Error de API Anthropic (Status {}): {}",
                status,
                body_text
            ));
        }

        let body: serde_json::Value = serde_json::from_str(&body_text)?;
        body["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                anyhow::anyhow!("Estructura de Anthropic inesperada. Body: {}", body_text)
            })
    }
}
