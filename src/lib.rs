//! # Style Extraction
//!
//! Extrae un perfil de estilo de escritura a partir de muestras markdown
//! delegando el análisis en un modelo de lenguaje, y lo convierte en
//! instrucciones listas para usar en prompts de generación.

pub mod ai;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod files;
pub mod profile;
pub mod registry;
pub mod ui;

// Re-exports públicos
pub use ai::{ProviderAgent, StructuredAgent, StructuredRequest};
pub use config::{ModelConfig, StyleConfig};
pub use error::{ExtractionError, ValidationError};
pub use extractor::{CAPABILITY_NAME, StyleExtractor, default_profile};
pub use profile::StyleProfile;
pub use registry::{CapabilityCoordinator, CapabilityRegistry};
