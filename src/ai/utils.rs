//! Utilidades para procesamiento de respuestas de IA
//!
//! Los modelos a veces envuelven el JSON en bloques markdown o lo rodean de
//! texto explicativo aunque se les pida "solo JSON".

/// Extrae el objeto JSON de una respuesta de IA.
///
/// Busca primero un bloque \`\`\`json ... \`\`\` (o \`\`\` sin etiqueta) y
/// después recorta desde la primera `{` hasta la última `}`. Si no encuentra
/// llaves devuelve el texto recortado tal cual, y será el parser quien falle.
///
/// # Ejemplo
///
/// ```
/// use style_extraction::ai::utils::extraer_json;
///
/// let respuesta = "Aquí está:\n```json\n{\"tone\": \"formal\"}\n```";
/// assert_eq!(extraer_json(respuesta), "{\"tone\": \"formal\"}");
/// ```
pub fn extraer_json(texto: &str) -> &str {
    let bloque = extraer_bloque(texto).unwrap_or(texto);

    match (bloque.find('{'), bloque.rfind('}')) {
        (Some(inicio), Some(fin)) if inicio < fin => &bloque[inicio..=fin],
        _ => bloque.trim(),
    }
}

/// Contenido del primer bloque de código markdown, sin delimitadores
fn extraer_bloque(texto: &str) -> Option<&str> {
    for tag in ["```json", "```JSON", "```"] {
        if let Some(start) = texto.find(tag) {
            let resto = &texto[start + tag.len()..];
            if let Some(end) = resto.find("```") {
                return Some(resto[..end].trim());
            }
        }
    }
    None
}
