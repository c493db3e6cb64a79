use log::info;
use std::sync::Arc;

use super::read_text_file;
use crate::error::ConfigError;

/// Instruction prepended to every completion call, sent exactly as written
/// (including the surrounding newlines).
pub const SYSTEM_PROMPT: &str = "
Eres un asistente experto en análisis, corrección y creación de código.
Dominas Python, JavaScript, HTML, Java, Docker y otros lenguajes de programación.
Tu objetivo es proporcionar respuestas técnicas claras, concisas y precisas.
Cuando presentes código:
- Usa siempre la sintaxis correcta y formato limpio.
- Incluye comentarios breves y útiles cuando sean necesarios.
- Asegúrate de que el código sea funcional y, si corresponde, optimizado.
Cuando analices código proporcionado por el usuario:
- Explica los errores o mejoras de manera detallada y práctica.
- Propón soluciones con ejemplos de código correctos.
Responde siempre en el mismo idioma en el que escribe el usuario.
";

/// Returns the built-in instruction, or the contents of `path` when one is
/// given. An override that cannot be read, or is blank, is a startup error.
pub fn load_system_prompt(path: Option<&str>) -> Result<Arc<str>, ConfigError> {
    match path {
        Some(path) => {
            let prompt = read_text_file("system prompt", path)?;
            info!("System prompt loaded from {}", path);
            Ok(Arc::from(prompt.trim()))
        }
        None => Ok(Arc::from(SYSTEM_PROMPT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn built_in_prompt_is_used_without_override() {
        let prompt = load_system_prompt(None).unwrap();
        assert_eq!(&*prompt, SYSTEM_PROMPT);

        let lines: Vec<&str> = prompt.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Eres un asistente experto en análisis, corrección y creación de código.");
        assert_eq!(lines[10], "Responde siempre en el mismo idioma en el que escribe el usuario.");
        assert!(prompt.starts_with('\n') && prompt.ends_with('\n'));
    }

    #[test]
    fn override_file_replaces_the_prompt() {
        let path = std::env::temp_dir().join(format!("chat-relay-prompt-{}.txt", std::process::id()));
        fs::write(&path, "  Be brief.\n").unwrap();

        let prompt = load_system_prompt(path.to_str()).unwrap();
        assert_eq!(&*prompt, "Be brief.");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let err = load_system_prompt(Some("/nonexistent/chat-relay/prompt.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
