//! Módulo de interfaz de usuario
//!
//! Funciones de presentación en la terminal.

use crate::profile::StyleProfile;
use colored::*;

/// Helper para mostrar una barra de progreso genérica
pub fn crear_progreso(mensaje: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    pb.set_message(mensaje.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Resumen coloreado de un perfil de estilo
pub fn mostrar_perfil(profile: &StyleProfile) {
    println!("\n{}", "✍️  PERFIL DE ESTILO".bright_white().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_cyan());
    println!("   Tono:          {}", profile.tone.green());
    println!("   Vocabulario:   {}", profile.vocabulary_level.green());
    println!("   Oraciones:     {}", profile.sentence_structure.green());
    println!("   Párrafos:      {}", profile.paragraph_length.green());
    println!("   Voz:           {}", profile.voice.green());

    if !profile.common_phrases.is_empty() {
        println!("   Frases:        {}", profile.common_phrases.join(", ").cyan());
    }
    if !profile.writing_patterns.is_empty() {
        println!("   Patrones:      {}", profile.writing_patterns.join(", ").cyan());
    }
    for ejemplo in &profile.examples {
        println!("   {} {}", "›".dimmed(), ejemplo.italic());
    }
    println!();
}
