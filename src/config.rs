use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Versión actual (leída desde Cargo.toml en tiempo de compilación)
pub const STYLE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nombre del archivo de configuración en el directorio de trabajo
pub const CONFIG_FILE: &str = ".stylerc.toml";

/// Modelo usado por defecto para el análisis de estilo
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// "openai", "anthropic", "gemini", "ollama", "lm-studio", "groq", "deepseek".
    /// Vacío = detectar por URL
    pub provider: String,
    pub name: String,
    pub url: String,
    pub api_key: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            name: DEFAULT_MODEL.to_string(),
            url: "".to_string(),
            api_key: "".to_string(),
        }
    }
}

impl ModelConfig {
    /// Completa `api_key` y `url` vacíos desde el entorno
    /// (`{PROVIDER}_API_KEY`, `{PROVIDER}_BASE_URL`) o el endpoint público.
    pub fn resolver(&self) -> Self {
        self.resolver_con(|var| std::env::var(var).ok())
    }

    pub fn resolver_con<F>(&self, buscar_var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resuelto = self.clone();
        let prefijo = self.provider.to_uppercase().replace('-', "_");

        if resuelto.api_key.is_empty() && !prefijo.is_empty() {
            if let Some(key) = buscar_var(&format!("{}_API_KEY", prefijo)) {
                resuelto.api_key = key;
            }
        }

        if resuelto.url.is_empty() {
            resuelto.url = buscar_var(&format!("{}_BASE_URL", prefijo))
                .filter(|_| !prefijo.is_empty())
                .unwrap_or_else(|| url_por_defecto(&self.provider).to_string());
        }

        resuelto
    }
}

/// Endpoint público de cada proveedor
pub fn url_por_defecto(provider: &str) -> &'static str {
    match provider {
        "anthropic" => "https://api.anthropic.com",
        "gemini" => "https://generativelanguage.googleapis.com",
        "ollama" => "http://localhost:11434",
        "lm-studio" => "http://localhost:1234",
        "groq" => "https://api.groq.com/openai",
        "deepseek" => "https://api.deepseek.com",
        _ => "https://api.openai.com",
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub version: String,
    /// Timeout HTTP de la llamada al modelo, en segundos
    pub timeout_secs: u64,
    pub model: ModelConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            version: STYLE_VERSION.to_string(),
            timeout_secs: 120,
            model: ModelConfig::default(),
        }
    }
}

impl StyleConfig {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), toml)?;

        // La config puede contener API keys
        Self::actualizar_gitignore(path)?;

        Ok(())
    }

    /// Agrega el archivo de configuración al .gitignore para proteger API keys
    pub fn actualizar_gitignore(path: &Path) -> anyhow::Result<()> {
        let gitignore_path = path.join(".gitignore");

        let mut content = if gitignore_path.exists() {
            fs::read_to_string(&gitignore_path)?
        } else {
            String::new()
        };

        if !content.contains(CONFIG_FILE) {
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str("# Style extraction - configuración (contiene API keys)\n");
            content.push_str(CONFIG_FILE);
            content.push('\n');

            fs::write(&gitignore_path, content)?;
            println!(
                "{}",
                "   ✅ Configuración agregada a .gitignore".green()
            );
        }

        Ok(())
    }

    /// Carga la configuración desde `.stylerc.toml`.
    ///
    /// Tolera campos faltantes usando valores por defecto. Devuelve `None` si
    /// el archivo no existe o no es TOML válido.
    pub fn load(path: &Path) -> Option<Self> {
        let config_path = path.join(CONFIG_FILE);
        let content = fs::read_to_string(&config_path).ok()?;

        match toml::from_str::<StyleConfig>(&content) {
            Ok(mut config) => {
                if config.version != STYLE_VERSION {
                    println!(
                        "{}",
                        format!(
                            "   🔄 Configuración de versión {}, usando {}",
                            config.version, STYLE_VERSION
                        )
                        .yellow()
                    );
                    config.version = STYLE_VERSION.to_string();
                }
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("   ⚠️  No se pudo cargar {}: {}", CONFIG_FILE, e).yellow()
                );
                None
            }
        }
    }

    /// Carga desde `path` o usa la configuración por defecto
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
