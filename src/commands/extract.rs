use crate::ai::ProviderAgent;
use crate::ai::providers::nombre_proveedor;
use crate::commands::OutputFormat;
use crate::config::{ModelConfig, StyleConfig};
use crate::extractor::StyleExtractor;
use crate::ui;
use colored::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Aviso para un proveedor remoto sin API key; `None` si no hace falta
pub fn aviso_sin_api_key(model: &ModelConfig) -> Option<String> {
    let provider = nombre_proveedor(model);
    if !model.api_key.is_empty() || provider == "ollama" || provider == "lm-studio" {
        return None;
    }
    Some(format!(
        "   ⚠️  Sin API key para '{}'. Define {}_API_KEY o edita .stylerc.toml",
        provider,
        provider.to_uppercase().replace('-', "_")
    ))
}

/// Ejecuta `style-extraction extract`
pub async fn handle_extract_command(
    dir: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    config: &StyleConfig,
) -> anyhow::Result<()> {
    let model = config.model.resolver();
    if let Some(aviso) = aviso_sin_api_key(&model) {
        eprintln!("{}", aviso.yellow());
    }

    let agent = ProviderAgent::new(&model, Duration::from_secs(config.timeout_secs));
    let extractor = StyleExtractor::new(Arc::new(agent)).with_model(model.name.clone());

    let spinner = ui::crear_progreso(&format!(
        "✍️  Analizando estilo con {} ({})...",
        model.name,
        nombre_proveedor(&model)
    ));
    let resultado = extractor.extract_style(dir).await;
    spinner.finish_and_clear();
    let profile = resultado?;

    if let Some(path) = output {
        fs::write(path, profile.to_json_pretty()?)?;
        println!(
            "{}",
            format!("   💾 Perfil guardado en {}", path.display()).green()
        );
    }

    match format {
        OutputFormat::Json => println!("{}", profile.to_json_pretty()?),
        OutputFormat::Prompt => {
            ui::mostrar_perfil(&profile);
            println!("{}", profile.to_prompt_text());
        }
    }

    Ok(())
}
