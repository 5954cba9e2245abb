//! # Utilidades de archivos para muestras de escritura
//!
//! Resolución de rutas con `~` y variables de entorno, descubrimiento
//! recursivo de archivos markdown y lectura acotada de cada muestra.
//!
//! El orden de descubrimiento es determinista: recorrido en profundidad
//! ordenando lexicográficamente las entradas de cada directorio, de modo que
//! `a/z.md` precede a `b.md` y éste a `c/a.md`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// `$VAR` o `${VAR}`
static ENV_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(?:\{([^}]*)\}|([A-Za-z0-9_]+))").unwrap());

/// Expande `~` inicial y variables de entorno, y convierte la ruta en absoluta
/// respecto al directorio actual.
///
/// Las variables no definidas se dejan tal cual (`$NO_EXISTE` sigue siendo
/// `$NO_EXISTE`).
pub fn expandir_ruta(ruta: &Path) -> PathBuf {
    // Una ruta no UTF-8 no admite expansión y se usa tal cual
    let expandida = match ruta.to_str() {
        Some(texto) => {
            let home = dirs::home_dir();
            expandir_ruta_con(texto, home.as_deref(), |var| std::env::var(var).ok())
        }
        None => ruta.to_path_buf(),
    };

    if expandida.is_absolute() {
        expandida
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expandida),
            Err(_) => expandida,
        }
    }
}

/// Núcleo de [`expandir_ruta`] con el home y la búsqueda de variables
/// inyectados. No toca el directorio actual.
pub fn expandir_ruta_con<F>(ruta: &str, home: Option<&Path>, buscar_var: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let con_vars = ENV_VAR_RE.replace_all(ruta, |caps: &regex::Captures| {
        let nombre = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        buscar_var(nombre).unwrap_or_else(|| caps[0].to_string())
    });

    match home {
        Some(home) if con_vars == "~" => home.to_path_buf(),
        Some(home) if con_vars.starts_with("~/") => home.join(&con_vars[2..]),
        _ => PathBuf::from(con_vars.as_ref()),
    }
}

/// Busca recursivamente archivos con la extensión dada bajo `root`.
///
/// Incluye archivos ocultos y no aplica `.gitignore`: el directorio de
/// muestras se trata tal cual. Los enlaces simbólicos a archivos cuentan; los
/// enlaces a directorios no se recorren. Si `root` no es un directorio
/// (inexistente o un archivo suelto) devuelve lista vacía.
pub fn descubrir_archivos(root: &Path, extension: &str) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build()
        .filter_map(|e| e.ok())
        .filter(|e| match e.file_type() {
            Some(t) if t.is_file() => true,
            Some(t) if t.is_symlink() => fs::metadata(e.path())
                .map(|m| m.is_file())
                .unwrap_or(false),
            _ => false,
        })
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| x == extension)
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

/// Lee un archivo como UTF-8 y lo recorta a `max_chars` caracteres.
///
/// Falla si el archivo no existe, no se puede abrir o no es UTF-8 válido.
pub fn leer_muestra(path: &Path, max_chars: usize) -> std::io::Result<String> {
    let contenido = fs::read_to_string(path)?;
    Ok(truncar_caracteres(&contenido, max_chars))
}

/// Recorta a `max` caracteres Unicode sin partir ningún carácter
pub fn truncar_caracteres(texto: &str, max: usize) -> String {
    match texto.char_indices().nth(max) {
        Some((corte, _)) => texto[..corte].to_string(),
        None => texto.to_string(),
    }
}
