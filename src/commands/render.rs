use crate::profile::StyleProfile;
use std::fs;
use std::path::Path;

/// Lee y valida un perfil JSON guardado
pub fn cargar_perfil(file: &Path) -> anyhow::Result<StyleProfile> {
    let contenido = fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("No se pudo leer {}: {}", file.display(), e))?;
    Ok(StyleProfile::from_json(&contenido)?)
}

/// Ejecuta `style-extraction render`
pub fn handle_render_command(file: &Path) -> anyhow::Result<()> {
    let profile = cargar_perfil(file)?;
    println!("{}", profile.to_prompt_text());
    Ok(())
}
