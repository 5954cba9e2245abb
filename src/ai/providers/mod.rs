//! Trait AiProvider y factory build_provider
//!
//! Providers soportados (campo `provider` en ModelConfig):
//! - `"anthropic"` — Claude (Anthropic Messages API)
//! - `"gemini"` — Google Gemini Content API
//! - `"ollama"` — Ollama local
//! - `"openai"` / `"lm-studio"` / `"groq"` / `"deepseek"` — OpenAI-compatible
//!
//! Para agregar un nuevo proveedor:
//! 1. Crear `src/ai/providers/mi_proveedor.rs` implementando `AiProvider`
//! 2. Agregar `pub mod mi_proveedor;` y re-export aquí
//! 3. Agregar un arm al match en `build_provider`

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai_compat;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai_compat::{ModoJson, OpenAiCompatProvider};

use crate::config::ModelConfig;
use reqwest::blocking::Client;
use std::sync::Arc;

pub trait AiProvider: Send + Sync {
    /// Envía una instrucción de sistema y un prompt, devuelve el texto de la respuesta.
    /// `schema` es el JSON Schema esperado; cada API decide si lo aprovecha.
    fn chat(
        &self,
        client: &Client,
        system: &str,
        prompt: &str,
        model_name: &str,
        schema: &serde_json::Value,
    ) -> anyhow::Result<String>;
}

/// Detecta el proveedor por la URL cuando `provider` viene vacío
pub fn detectar_proveedor(url: &str) -> &'static str {
    let url = url.to_lowercase();
    if url.contains("googleapis") {
        "gemini"
    } else if url.contains("anthropic") {
        "anthropic"
    } else if url.contains(":11434") || url.contains("ollama") {
        "ollama"
    } else {
        "openai"
    }
}

/// Nombre efectivo del proveedor: el configurado o, si está vacío, el detectado por URL
pub fn nombre_proveedor(config: &ModelConfig) -> &str {
    if config.provider.is_empty() {
        detectar_proveedor(&config.url)
    } else {
        config.provider.as_str()
    }
}

/// Único punto de despacho de providers.
/// El campo `provider` en ModelConfig determina cuál se usa.
/// Si está vacío, se intenta detectar por URL.
pub fn build_provider(config: &ModelConfig) -> Arc<dyn AiProvider> {
    let provider = nombre_proveedor(config);

    match provider {
        "anthropic" => Arc::new(AnthropicProvider::new(&config.api_key, &config.url)),
        "gemini" => Arc::new(GeminiProvider::new(&config.api_key, &config.url)),
        "ollama" => Arc::new(OllamaProvider::new(&config.url)),
        _ => Arc::new(OpenAiCompatProvider::new(
            &config.api_key,
            &config.url,
            ModoJson::para_proveedor(provider),
        )),
    }
}
