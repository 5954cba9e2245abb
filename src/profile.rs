//! Perfil de estilo de escritura
//!
//! Modelo de datos que captura las características esenciales del estilo de un
//! autor y su conversión a texto de instrucciones para prompts de generación.

use crate::error::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Máximo de frases comunes incluidas en el texto de prompt
pub const MAX_PROMPT_PHRASES: usize = 5;
/// Máximo de oraciones de ejemplo incluidas en el texto de prompt
pub const MAX_PROMPT_EXAMPLES: usize = 3;

/// Perfil de estilo extraído de muestras de escritura.
///
/// Los cinco campos escalares son obligatorios; las tres listas son opcionales
/// y por defecto quedan vacías. Al deserializar desde JSON o desde un mapa se
/// aplica la misma validación (ver [`StyleProfile::from_json`]).
///
/// # Ejemplo
///
/// ```
/// use style_extraction::StyleProfile;
///
/// let profile = StyleProfile::new("conversational", "moderate", "short and direct", "medium", "active")
///     .with_common_phrases(vec!["in other words".to_string()]);
/// assert!(profile.to_prompt_text().contains("conversational tone"));
/// ```
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct StyleProfile {
    /// Overall tone (formal, conversational, technical, etc.)
    pub tone: String,
    /// Vocabulary complexity (simple, moderate, advanced)
    pub vocabulary_level: String,
    /// Typical sentence patterns
    pub sentence_structure: String,
    /// Typical paragraph length preference
    pub paragraph_length: String,
    /// Active vs passive voice preference
    pub voice: String,
    /// Frequently used phrases or expressions
    #[serde(default)]
    pub common_phrases: Vec<String>,
    /// Common structural patterns
    #[serde(default)]
    pub writing_patterns: Vec<String>,
    /// Example sentences capturing style
    #[serde(default)]
    pub examples: Vec<String>,
}

impl StyleProfile {
    /// Crea un perfil con los campos obligatorios y listas vacías
    pub fn new(
        tone: impl Into<String>,
        vocabulary_level: impl Into<String>,
        sentence_structure: impl Into<String>,
        paragraph_length: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            tone: tone.into(),
            vocabulary_level: vocabulary_level.into(),
            sentence_structure: sentence_structure.into(),
            paragraph_length: paragraph_length.into(),
            voice: voice.into(),
            common_phrases: Vec::new(),
            writing_patterns: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn with_common_phrases(mut self, phrases: Vec<String>) -> Self {
        self.common_phrases = phrases;
        self
    }

    pub fn with_writing_patterns(mut self, patterns: Vec<String>) -> Self {
        self.writing_patterns = patterns;
        self
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }

    /// Convierte el perfil en instrucciones en lenguaje natural para un LLM.
    ///
    /// Siempre emite las cinco líneas obligatorias en orden fijo. Las frases
    /// comunes se limitan a [`MAX_PROMPT_PHRASES`] y los ejemplos a
    /// [`MAX_PROMPT_EXAMPLES`]; los patrones se incluyen todos.
    pub fn to_prompt_text(&self) -> String {
        let mut parts = vec![
            format!("Write with a {} tone.", self.tone),
            format!("Use {} vocabulary level.", self.vocabulary_level),
            format!("Structure sentences: {}.", self.sentence_structure),
            format!("Prefer {} paragraphs.", self.paragraph_length),
            format!("Use {} voice.", self.voice),
        ];

        if !self.common_phrases.is_empty() {
            let phrases = self
                .common_phrases
                .iter()
                .take(MAX_PROMPT_PHRASES)
                .map(|p| format!("\"{}\"", p))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("Common phrases include: {}.", phrases));
        }

        if !self.writing_patterns.is_empty() {
            parts.push(format!(
                "Follow these patterns: {}.",
                self.writing_patterns.join(", ")
            ));
        }

        if !self.examples.is_empty() {
            parts.push("Example style:".to_string());
            for example in self.examples.iter().take(MAX_PROMPT_EXAMPLES) {
                parts.push(format!("  - \"{}\"", example));
            }
        }

        parts.join("\n")
    }

    /// Valida y construye un perfil desde texto JSON
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Valida y construye un perfil desde un valor JSON ya parseado
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Valida y construye un perfil desde un mapa clave/valor plano
    pub fn from_map(map: Map<String, Value>) -> Result<Self, ValidationError> {
        Self::from_value(Value::Object(map))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Representación como mapa plano con exactamente los ocho campos
    pub fn to_map(&self) -> Map<String, Value> {
        let lista = |items: &[String]| {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        };

        let mut map = Map::new();
        map.insert("tone".to_string(), Value::String(self.tone.clone()));
        map.insert(
            "vocabulary_level".to_string(),
            Value::String(self.vocabulary_level.clone()),
        );
        map.insert(
            "sentence_structure".to_string(),
            Value::String(self.sentence_structure.clone()),
        );
        map.insert(
            "paragraph_length".to_string(),
            Value::String(self.paragraph_length.clone()),
        );
        map.insert("voice".to_string(), Value::String(self.voice.clone()));
        map.insert("common_phrases".to_string(), lista(&self.common_phrases));
        map.insert("writing_patterns".to_string(), lista(&self.writing_patterns));
        map.insert("examples".to_string(), lista(&self.examples));
        map
    }

    /// JSON Schema del perfil, usado como esquema de salida para el modelo
    pub fn json_schema() -> Value {
        let schema = schemars::schema_for!(StyleProfile);
        serde_json::to_value(schema).unwrap_or(Value::Null)
    }
}
