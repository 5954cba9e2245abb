use crate::config::{CONFIG_FILE, StyleConfig};
use colored::*;
use std::path::Path;

/// Crea `.stylerc.toml` en `root`.
/// Returns Err if config already exists and force == false.
pub fn run_init(root: &Path, force: bool) -> anyhow::Result<()> {
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Ya existe una configuración en {}. Usa --force para sobrescribir.",
            config_path.display()
        );
    }

    StyleConfig::default().save(root)
}

pub fn handle_init_command(root: &Path, force: bool) -> anyhow::Result<()> {
    println!("\n{}", "🚀 Style Extraction Init".bold().green());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    run_init(root, force)?;

    println!(
        "   ✅ Configuración creada en: {}",
        root.join(CONFIG_FILE).display().to_string().cyan()
    );
    println!("\n   {} Próximos pasos:", "💡".yellow());
    println!("      export OPENAI_API_KEY=...            # o edita api_key en {}", CONFIG_FILE);
    println!("      style-extraction extract ~/writings   # extrae el perfil");
    Ok(())
}
