// src/ai/providers/openai_compat.rs
use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::{Value, json};

/// Forma de pedir salida JSON al servidor (`response_format`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModoJson {
    /// `{"type": "json_object"}`: OpenAI, Groq, DeepSeek
    JsonObject,
    /// `{"type": "json_schema", ...}` con el esquema de la petición: LM Studio
    JsonSchema,
    /// Sin `response_format`; el prompt ya exige JSON
    Texto,
}

impl ModoJson {
    pub fn para_proveedor(provider: &str) -> Self {
        match provider {
            "openai" | "groq" | "deepseek" => ModoJson::JsonObject,
            // LM Studio rechaza json_object con 400
            "lm-studio" => ModoJson::JsonSchema,
            _ => ModoJson::Texto,
        }
    }
}

/// OpenAI y cualquier API compatible (LM Studio, Groq, DeepSeek...)
pub struct OpenAiCompatProvider {
    api_key: String,
    url: String,
    modo: ModoJson,
}

impl OpenAiCompatProvider {
    pub fn new(api_key: &str, url: &str, modo: ModoJson) -> Self {
        Self {
            api_key: api_key.to_string(),
            url: url.to_string(),
            modo,
        }
    }

    pub fn cuerpo(&self, system: &str, prompt: &str, model_name: &str, schema: &Value) -> Value {
        let mut body = json!({
            "model": model_name,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ]
        });

        match self.modo {
            ModoJson::JsonObject => {
                body["response_format"] = json!({"type": "json_object"});
            }
            ModoJson::JsonSchema => {
                let nombre = schema
                    .get("title")
                    .and_then(|t| t.as_str())
                    .unwrap_or("respuesta");
                body["response_format"] = json!({
                    "type": "json_schema",
                    "json_schema": {"name": nombre, "schema": schema}
                });
            }
            ModoJson::Texto => {}
        }

        body
    }
}

impl super::AiProvider for OpenAiCompatProvider {
    fn chat(
        &self,
        client: &Client,
        system: &str,
        prompt: &str,
        model_name: &str,
        schema: &Value,
    ) -> Result<String> {
        let base = self.url.trim_end_matches('/');
        let url = if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        };

        let mut request = client
            .post(&url)
            .json(&self.cuerpo(system, prompt, model_name, schema));
        // LM Studio local no requiere clave
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request.send()?;
        let status = response.status();
        let body_text = response.text()?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Error de API OpenAI-Compat (Status {}): {}",
                status,
                body_text
            ));
        }

        let body: serde_json::Value = serde_json::from_str(&body_text)?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Estructura de OpenAI-Compat inesperada. Body: {}",
                    body_text
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Value {
        json!({"title": "StyleProfile", "type": "object", "required": ["tone"]})
    }

    fn cuerpo_para(provider: &str) -> Value {
        OpenAiCompatProvider::new("", "http://localhost", ModoJson::para_proveedor(provider))
            .cuerpo("sys", "prompt", "modelo", &schema())
    }

    #[test]
    fn test_json_object_para_apis_que_lo_soportan() {
        for provider in ["openai", "groq", "deepseek"] {
            let body = cuerpo_para(provider);
            assert_eq!(body["response_format"], json!({"type": "json_object"}), "{}", provider);
            assert_eq!(body["messages"][0]["content"], "sys");
            assert_eq!(body["messages"][1]["content"], "prompt");
        }
    }

    #[test]
    fn test_lm_studio_usa_json_schema() {
        let body = cuerpo_para("lm-studio");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "StyleProfile");
        assert_eq!(body["response_format"]["json_schema"]["schema"], schema());
    }

    #[test]
    fn test_json_schema_sin_titulo() {
        let provider = OpenAiCompatProvider::new("", "http://localhost", ModoJson::JsonSchema);
        let body = provider.cuerpo("sys", "prompt", "modelo", &json!({"type": "object"}));
        assert_eq!(body["response_format"]["json_schema"]["name"], "respuesta");
    }

    #[test]
    fn test_proveedor_desconocido_sin_response_format() {
        let body = cuerpo_para("mistral");
        assert!(body.get("response_format").is_none());
        assert_eq!(body["model"], "modelo");
    }
}
