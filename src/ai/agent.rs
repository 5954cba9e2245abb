//! Agente de salida estructurada sobre proveedores HTTP
//!
//! Los providers son síncronos (reqwest blocking), así que la llamada se
//! ejecuta dentro de `spawn_blocking` para no bloquear el runtime de Tokio.

use crate::ai::providers::{AiProvider, build_provider};
use crate::ai::utils::extraer_json;
use crate::ai::{StructuredAgent, StructuredRequest};
use crate::config::ModelConfig;
use async_trait::async_trait;
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;

pub struct ProviderAgent {
    provider: Arc<dyn AiProvider>,
    timeout: Duration,
}

impl ProviderAgent {
    pub fn new(model: &ModelConfig, timeout: Duration) -> Self {
        Self::with_provider(build_provider(model), timeout)
    }

    pub fn with_provider(provider: Arc<dyn AiProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Añade al prompt el esquema y la orden de responder solo con JSON
    pub fn construir_prompt(request: &StructuredRequest) -> anyhow::Result<String> {
        let schema = serde_json::to_string_pretty(&request.output_schema)?;
        Ok(format!(
            "{}\n\n\
            Respond ONLY with a single JSON object that conforms to this JSON Schema. \
            No markdown, no commentary.\n\n\
            JSON Schema:\n{}",
            request.prompt, schema
        ))
    }
}

#[async_trait]
impl StructuredAgent for ProviderAgent {
    async fn run(&self, request: &StructuredRequest) -> anyhow::Result<serde_json::Value> {
        let prompt = Self::construir_prompt(request)?;
        let provider = Arc::clone(&self.provider);
        let system = request.system_prompt.clone();
        let model = request.model.clone();
        let schema = request.output_schema.clone();
        let timeout = self.timeout;

        // El cliente blocking se crea y se suelta dentro del hilo bloqueante
        let respuesta = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            let client = Client::builder().timeout(timeout).build()?;
            provider.chat(&client, &system, &prompt, &model, &schema)
        })
        .await??;

        serde_json::from_str(extraer_json(&respuesta)).map_err(|e| {
            anyhow::anyhow!(
                "La respuesta del modelo no es JSON válido: {}. Respuesta: {}",
                e,
                respuesta
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeProvider {
        respuesta: anyhow::Result<String>,
        recibido: Mutex<Option<(String, String, String)>>,
    }

    impl FakeProvider {
        fn ok(texto: &str) -> Self {
            Self {
                respuesta: Ok(texto.to_string()),
                recibido: Mutex::new(None),
            }
        }
    }

    impl AiProvider for FakeProvider {
        fn chat(
            &self,
            _client: &Client,
            system: &str,
            prompt: &str,
            model: &str,
            _schema: &serde_json::Value,
        ) -> anyhow::Result<String> {
            *self.recibido.lock().unwrap() =
                Some((system.to_string(), prompt.to_string(), model.to_string()));
            match &self.respuesta {
                Ok(texto) => Ok(texto.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    fn request() -> StructuredRequest {
        StructuredRequest {
            system_prompt: "You are a test".to_string(),
            model: "gpt-4o".to_string(),
            output_schema: json!({"type": "object", "required": ["tone"]}),
            prompt: "Analyze this".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_parses_fenced_json_and_forwards_request() {
        let provider = Arc::new(FakeProvider::ok("Sure!\n```json\n{\"tone\": \"formal\"}\n```"));
        let agent = ProviderAgent::with_provider(provider.clone(), Duration::from_secs(5));

        let valor = agent.run(&request()).await.unwrap();
        assert_eq!(valor, json!({"tone": "formal"}));

        let (system, prompt, model) = provider.recibido.lock().unwrap().clone().unwrap();
        assert_eq!(system, "You are a test");
        assert_eq!(model, "gpt-4o");
        assert!(prompt.starts_with("Analyze this"));
        assert!(prompt.contains("\"required\""));
    }

    #[tokio::test]
    async fn test_run_rejects_non_json_reply() {
        let provider = Arc::new(FakeProvider::ok("I cannot help with that."));
        let agent = ProviderAgent::with_provider(provider, Duration::from_secs(5));
        let err = agent.run(&request()).await.unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }

    #[tokio::test]
    async fn test_run_propagates_provider_error() {
        let provider = Arc::new(FakeProvider {
            respuesta: Err(anyhow::anyhow!("Error de API (Status 500)")),
            recibido: Mutex::new(None),
        });
        let agent = ProviderAgent::with_provider(provider, Duration::from_secs(5));
        let err = agent.run(&request()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
