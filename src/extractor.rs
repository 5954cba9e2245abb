//! Extracción de estilo desde muestras de escritura
//!
//! Lee un conjunto acotado de archivos markdown, pide a un agente de salida
//! estructurada que los analice y devuelve un [`StyleProfile`].
//!
//! Política de errores:
//! - Sin archivos `.md` o sin ninguna muestra legible → [`ExtractionError`]
//! - Archivo individual ilegible → se omite con una advertencia
//! - Fallo del agente (red, timeout, respuesta inválida) → perfil por defecto
//!   con una advertencia, nunca se propaga

use crate::ai::{StructuredAgent, StructuredRequest};
use crate::config::DEFAULT_MODEL;
use crate::error::ExtractionError;
use crate::files::{descubrir_archivos, expandir_ruta, leer_muestra};
use crate::profile::StyleProfile;
use crate::registry::CapabilityRegistry;
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Nombre bajo el que el extractor se registra en un coordinador
pub const CAPABILITY_NAME: &str = "style_extraction.analyzer";
/// Máximo de archivos leídos por extracción
pub const MAX_SAMPLES: usize = 5;
/// Máximo de caracteres leídos de cada archivo
pub const MAX_CHARS_PER_SAMPLE: usize = 3000;
pub const SAMPLE_EXTENSION: &str = "md";

pub const SYSTEM_PROMPT: &str = "You are an expert writing style analyst. \
Extract detailed style characteristics from text samples.";

/// Extrae el estilo de un autor a partir de sus muestras de escritura.
///
/// # Ejemplo
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use style_extraction::{ProviderAgent, StyleConfig, StyleExtractor};
///
/// # async fn demo() -> anyhow::Result<()> {
/// let config = StyleConfig::default();
/// let agent = ProviderAgent::new(&config.model.resolver(), Duration::from_secs(120));
/// let extractor = StyleExtractor::new(Arc::new(agent));
/// let profile = extractor.extract_style("~/writings").await?;
/// println!("{}", profile.tone);
/// # Ok(())
/// # }
/// ```
pub struct StyleExtractor {
    agent: Arc<dyn StructuredAgent>,
    model: String,
    /// Último perfil extraído. Informativo: `extract_style` no lo consulta
    profile: Mutex<Option<StyleProfile>>,
}

impl StyleExtractor {
    pub fn new(agent: Arc<dyn StructuredAgent>) -> Self {
        Self {
            agent,
            model: DEFAULT_MODEL.to_string(),
            profile: Mutex::new(None),
        }
    }

    /// Cambia el modelo enviado al agente (por defecto `gpt-4o`)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Comparte el extractor y, si hay coordinador, se registra en él como
    /// [`CAPABILITY_NAME`].
    pub fn register_with(self, coordinator: Option<&dyn CapabilityRegistry>) -> Arc<Self> {
        let extractor = Arc::new(self);
        if let Some(coordinator) = coordinator {
            coordinator.register_capability(CAPABILITY_NAME, extractor.clone());
        }
        extractor
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Último perfil extraído, si lo hay
    pub fn profile(&self) -> Option<StyleProfile> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Extrae el perfil de estilo de las muestras `.md` bajo `samples_dir`.
    ///
    /// La ruta admite `~` y variables de entorno. Se leen como máximo
    /// [`MAX_SAMPLES`] archivos en orden lexicográfico, cada uno recortado a
    /// [`MAX_CHARS_PER_SAMPLE`] caracteres.
    pub async fn extract_style(
        &self,
        samples_dir: impl AsRef<Path>,
    ) -> Result<StyleProfile, ExtractionError> {
        let samples_dir = expandir_ruta(samples_dir.as_ref());

        let archivos = descubrir_archivos(&samples_dir, SAMPLE_EXTENSION);
        if archivos.is_empty() {
            return Err(ExtractionError::NoMarkdownFiles { dir: samples_dir });
        }

        let muestras = leer_muestras(&archivos);
        if muestras.is_empty() {
            return Err(ExtractionError::NoReadableSamples);
        }

        let combinadas = muestras.join("\n\n");
        let profile = self.analyze_with_ai(&combinadas).await;

        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());

        Ok(profile)
    }

    /// Petición completa que se envía al agente para unas muestras dadas
    pub fn build_request(&self, samples: &str) -> StructuredRequest {
        StructuredRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            model: self.model.clone(),
            output_schema: StyleProfile::json_schema(),
            prompt: construir_prompt(samples),
        }
    }

    /// Nunca falla: cualquier error del agente se sustituye por
    /// [`default_profile`].
    async fn analyze_with_ai(&self, samples: &str) -> StyleProfile {
        let request = self.build_request(samples);

        let resultado = match self.agent.run(&request).await {
            Ok(valor) => StyleProfile::from_value(valor).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        match resultado {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("   ⚠️  Falló la extracción de estilo: {}", e).yellow()
                );
                eprintln!("{}", "   ℹ️  Usando perfil de estilo por defecto".dimmed());
                default_profile()
            }
        }
    }
}

/// Perfil conversacional usado cuando el análisis con IA falla
pub fn default_profile() -> StyleProfile {
    StyleProfile::new("conversational", "moderate", "varied", "medium", "active")
        .with_writing_patterns(vec![
            "introduction-body-conclusion".to_string(),
            "problem-solution".to_string(),
        ])
        .with_examples(vec![
            "Clear and direct communication.".to_string(),
            "Focus on practical value.".to_string(),
        ])
}

/// Lee hasta [`MAX_SAMPLES`] archivos, cada uno como `=== nombre ===\ncontenido`.
/// Los que fallan se omiten con advertencia.
fn leer_muestras(archivos: &[PathBuf]) -> Vec<String> {
    let mut muestras = Vec::new();

    for archivo in archivos.iter().take(MAX_SAMPLES) {
        match leer_muestra(archivo, MAX_CHARS_PER_SAMPLE) {
            Ok(contenido) => {
                let nombre = archivo
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                muestras.push(format!("=== {} ===\n{}", nombre, contenido));
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("   ⚠️  No se pudo leer {}: {}", archivo.display(), e).yellow()
                );
            }
        }
    }

    muestras
}

fn construir_prompt(samples: &str) -> String {
    format!(
        "Analyze these writing samples to extract the author's style:\n\n\
        {}\n\n\
        Extract:\n\
        1. Overall tone (formal/casual/technical/conversational)\n\
        2. Vocabulary complexity level (simple/moderate/advanced)\n\
        3. Typical sentence structure patterns\n\
        4. Paragraph length preference (short/medium/long)\n\
        5. Common phrases or expressions (list)\n\
        6. Recurring writing patterns (list)\n\
        7. Voice preference (active/passive/mixed)\n\
        8. 3-5 example sentences that best capture the style (list)\n\n\
        Return a structured response with these fields.",
        samples
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CapabilityCoordinator;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    /// Agente determinista: devuelve un valor fijo o falla, y guarda las peticiones
    struct MockAgent {
        respuesta: Option<Value>,
        peticiones: Mutex<Vec<StructuredRequest>>,
    }

    impl MockAgent {
        fn ok(valor: Value) -> Arc<Self> {
            Arc::new(Self {
                respuesta: Some(valor),
                peticiones: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                respuesta: None,
                peticiones: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.peticiones
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.prompt.clone())
                .collect()
        }
    }

    #[async_trait]
    impl StructuredAgent for MockAgent {
        async fn run(&self, request: &StructuredRequest) -> anyhow::Result<Value> {
            self.peticiones.lock().unwrap().push(request.clone());
            self.respuesta
                .clone()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn perfil_formal() -> Value {
        json!({
            "tone": "formal",
            "vocabulary_level": "advanced",
            "sentence_structure": "complex and flowing",
            "paragraph_length": "long",
            "voice": "passive",
            "common_phrases": ["moreover"],
            "writing_patterns": ["thesis-evidence-conclusion"],
            "examples": ["It is worth noting."]
        })
    }

    #[tokio::test]
    async fn test_sin_markdown_falla_nombrando_directorio() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notas.txt"), "no es markdown").unwrap();
        let agent = MockAgent::ok(perfil_formal());
        let extractor = StyleExtractor::new(agent.clone());

        let err = extractor.extract_style(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoMarkdownFiles { .. }));
        assert!(err.to_string().contains(&tmp.path().display().to_string()));
        assert!(agent.prompts().is_empty(), "no debe llamar al agente");
        assert!(extractor.profile().is_none());
    }

    #[tokio::test]
    async fn test_directorio_inexistente() {
        let tmp = TempDir::new().unwrap();
        let extractor = StyleExtractor::new(MockAgent::ok(perfil_formal()));
        let err = extractor
            .extract_style(tmp.path().join("no-existe"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoMarkdownFiles { .. }));
    }

    #[tokio::test]
    async fn test_ninguna_muestra_legible() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("roto.md"), [0xff, 0xfe, 0xfd]).unwrap();
        let agent = MockAgent::ok(perfil_formal());
        let extractor = StyleExtractor::new(agent.clone());

        let err = extractor.extract_style(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoReadableSamples));
        assert_eq!(err.to_string(), "Could not read any writing samples");
        assert!(agent.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_archivo_ilegible_se_omite() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a_roto.md"), [0xc3, 0x28]).unwrap();
        fs::write(tmp.path().join("b_bueno.md"), "Hola, mundo.").unwrap();
        let agent = MockAgent::ok(perfil_formal());
        let extractor = StyleExtractor::new(agent.clone());

        let profile = extractor.extract_style(tmp.path()).await.unwrap();
        assert_eq!(profile.tone, "formal");

        let prompt = &agent.prompts()[0];
        assert!(prompt.contains("=== b_bueno.md ===\nHola, mundo."));
        assert!(!prompt.contains("a_roto.md"));
    }

    #[tokio::test]
    async fn test_exito_devuelve_y_guarda_perfil() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("post.md"), "# Título\n\nTexto.").unwrap();
        let extractor = StyleExtractor::new(MockAgent::ok(perfil_formal()));

        let profile = extractor.extract_style(tmp.path()).await.unwrap();
        let esperado = StyleProfile::from_value(perfil_formal()).unwrap();
        assert_eq!(profile, esperado);
        assert_eq!(extractor.profile(), Some(esperado));
    }

    #[tokio::test]
    async fn test_fallo_del_agente_usa_perfil_por_defecto() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("post.md"), "Texto.").unwrap();
        let extractor = StyleExtractor::new(MockAgent::failing());

        let profile = extractor.extract_style(tmp.path()).await.unwrap();
        assert_eq!(profile.tone, "conversational");
        assert_eq!(profile.vocabulary_level, "moderate");
        assert_eq!(profile.sentence_structure, "varied");
        assert_eq!(profile.paragraph_length, "medium");
        assert_eq!(profile.voice, "active");
        assert!(profile.common_phrases.is_empty());
        assert_eq!(
            profile.writing_patterns,
            vec!["introduction-body-conclusion", "problem-solution"]
        );
        assert_eq!(
            profile.examples,
            vec!["Clear and direct communication.", "Focus on practical value."]
        );
        assert_eq!(extractor.profile(), Some(default_profile()));
    }

    #[tokio::test]
    async fn test_respuesta_invalida_usa_perfil_por_defecto() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("post.md"), "Texto.").unwrap();
        let extractor = StyleExtractor::new(MockAgent::ok(json!({"tone": "formal"})));

        let profile = extractor.extract_style(tmp.path()).await.unwrap();
        assert_eq!(profile, default_profile());
    }

    #[tokio::test]
    async fn test_solo_primeros_cinco_archivos_y_truncado() {
        let tmp = TempDir::new().unwrap();
        for i in 0..7 {
            let contenido = format!("{}FIN{}", "a".repeat(MAX_CHARS_PER_SAMPLE), i);
            fs::write(tmp.path().join(format!("post{}.md", i)), contenido).unwrap();
        }
        let agent = MockAgent::ok(perfil_formal());
        let extractor = StyleExtractor::new(agent.clone());
        extractor.extract_style(tmp.path()).await.unwrap();

        let prompt = &agent.prompts()[0];
        for i in 0..5 {
            assert!(prompt.contains(&format!("=== post{}.md ===", i)));
        }
        assert!(!prompt.contains("post5.md"));
        assert!(!prompt.contains("post6.md"));
        assert!(!prompt.contains("FIN"), "el contenido debe truncarse a 3000 caracteres");
        assert!(prompt.contains(&format!("=== post0.md ===\n{}\n\n=== post1.md ===", "a".repeat(MAX_CHARS_PER_SAMPLE))));
    }

    #[tokio::test]
    async fn test_busqueda_recursiva_y_formato_combinado() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("2024")).unwrap();
        fs::write(tmp.path().join("2024").join("uno.md"), "primero").unwrap();
        fs::write(tmp.path().join("dos.md"), "segundo").unwrap();
        let agent = MockAgent::ok(perfil_formal());
        let extractor = StyleExtractor::new(agent.clone());
        extractor.extract_style(tmp.path()).await.unwrap();

        let prompt = &agent.prompts()[0];
        assert!(prompt.contains("=== uno.md ===\nprimero\n\n=== dos.md ===\nsegundo"));
        assert!(prompt.starts_with("Analyze these writing samples to extract the author's style:"));
        assert!(prompt.ends_with("Return a structured response with these fields."));
    }

    #[test]
    fn test_build_request_campos_fijos() {
        let extractor = StyleExtractor::new(MockAgent::failing());
        let request = extractor.build_request("=== a.md ===\nhola");
        assert_eq!(request.system_prompt, SYSTEM_PROMPT);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.output_schema, StyleProfile::json_schema());
        assert!(request.prompt.contains("=== a.md ===\nhola"));
        assert!(request.prompt.contains("8. 3-5 example sentences"));

        let extractor = StyleExtractor::new(MockAgent::failing()).with_model("llama3");
        assert_eq!(extractor.model(), "llama3");
        assert_eq!(extractor.build_request("x").model, "llama3");
    }

    #[test]
    fn test_registro_en_coordinador() {
        let coordinator = CapabilityCoordinator::new();
        let extractor =
            StyleExtractor::new(MockAgent::failing()).register_with(Some(&coordinator));

        let registrado = coordinator
            .get_as::<StyleExtractor>(CAPABILITY_NAME)
            .unwrap();
        assert!(Arc::ptr_eq(&registrado, &extractor));

        let solo = StyleExtractor::new(MockAgent::failing()).register_with(None);
        assert!(solo.profile().is_none());
    }
}
