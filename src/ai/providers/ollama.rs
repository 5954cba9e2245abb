// src/ai/providers/ollama.rs
use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::json;

pub struct OllamaProvider {
    url: String,
}

impl OllamaProvider {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl super::AiProvider for OllamaProvider {
    fn chat(
        &self,
        client: &Client,
        system: &str,
        prompt: &str,
        model_name: &str,
        _schema: &serde_json::Value,
    ) -> Result<String> {
        let url = format!("{}/api/generate", self.url.trim_end_matches('/'));

        let response = client
            .post(&url)
            .json(&json!({
                "model": model_name,
                "system": system,
                "prompt": prompt,
                "format": "json",
                "stream": false
            }))
            .send()?;

        let status = response.status();
        let body_text = response.text()?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Error de API Ollama (Status {}): {}",
                status,
                body_text
            ));
        }

        let body: serde_json::Value = serde_json::from_str(&body_text)?;
        body["response"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Estructura de Ollama inesperada. Body: {}", body_text))
    }
}
