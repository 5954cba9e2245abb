pub mod extract;
pub mod init;
pub mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "style-extraction")]
#[command(about = "Extract a writing style profile from markdown samples", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analiza las muestras .md de un directorio y muestra el perfil
    Extract {
        /// Directorio con las muestras (admite ~ y variables de entorno)
        dir: PathBuf,
        /// Formato de salida
        #[arg(long, value_enum, default_value_t = OutputFormat::Prompt)]
        format: OutputFormat,
        /// Guarda el perfil como JSON en este archivo
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Convierte un perfil JSON guardado en texto de prompt
    Render {
        /// Archivo JSON con el perfil
        file: PathBuf,
    },
    /// Crea un .stylerc.toml con la configuración por defecto
    Init {
        /// Sobrescribe la configuración existente
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Instrucciones en lenguaje natural para prompts
    Prompt,
    /// JSON con los ocho campos del perfil
    Json,
}
