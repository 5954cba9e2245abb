//! # Style Extraction CLI
//!
//! Extrae el estilo de escritura de un autor desde sus muestras markdown y lo
//! muestra como perfil JSON o como instrucciones para prompts.

use clap::Parser;
use colored::*;
use style_extraction::commands::{self, Cli, Commands};
use style_extraction::config::StyleConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));

    let resultado = match cli.command {
        Commands::Extract { dir, format, output } => {
            let config = StyleConfig::load_or_default(&cwd);
            commands::extract::handle_extract_command(&dir, format, output.as_deref(), &config)
                .await
        }
        Commands::Render { file } => commands::render::handle_render_command(&file),
        Commands::Init { force } => commands::init::handle_init_command(&cwd, force),
    };

    if let Err(e) = resultado {
        eprintln!("{}", format!("❌ {}", e).red());
        std::process::exit(1);
    }
}
