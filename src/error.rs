//! Errores públicos del extractor de estilo

use std::path::PathBuf;
use thiserror::Error;

/// Fallos que dejan la entrada inutilizable. Son fatales para la llamada a
/// `extract_style`, el llamador decide cómo recuperarse.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No hay ningún `.md` bajo el directorio buscado.
    #[error("No markdown files found in {}", dir.display())]
    NoMarkdownFiles { dir: PathBuf },

    /// Se encontraron archivos pero ninguno se pudo leer.
    #[error("Could not read any writing samples")]
    NoReadableSamples,
}

/// Datos que no forman un `StyleProfile` válido (campo obligatorio ausente,
/// nulo o de tipo incorrecto).
#[derive(Debug, Error)]
#[error("Invalid style profile: {0}")]
pub struct ValidationError(#[from] serde_json::Error);
