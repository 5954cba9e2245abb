//! Módulo de integración con IA
//!
//! Proporciona:
//! - El puerto `StructuredAgent`: petición estructurada → valor JSON
//! - `ProviderAgent`, implementación sobre proveedores HTTP reales
//! - Utilidades para limpiar respuestas de modelos

pub mod agent;
pub mod providers;
pub mod utils;

pub use agent::ProviderAgent;
pub use providers::{AiProvider, build_provider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Petición a un agente de salida estructurada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredRequest {
    /// Instrucción de sistema fija para el modelo
    pub system_prompt: String,
    /// Identificador del modelo (ej: "gpt-4o")
    pub model: String,
    /// JSON Schema que debe cumplir la respuesta
    pub output_schema: serde_json::Value,
    pub prompt: String,
}

/// Capacidad externa: dado un sistema, un modelo y un esquema, envía el prompt
/// y devuelve un valor que cumple el esquema, o falla.
#[async_trait]
pub trait StructuredAgent: Send + Sync {
    async fn run(&self, request: &StructuredRequest) -> anyhow::Result<serde_json::Value>;
}
