//! # Prompt Composition
//!
//! Preamble describing the on-screen Pokémon, followed by the user's
//! question. The text is Spanish because the app ships in Spanish.

use super::context::CurrentPokemon;

const USER_PREFIX: &str = "Usuario: ";
const UNKNOWN_TYPES: &str = "desconocido";

/// Phrases that ask for a picture rather than text
const IMAGE_PHRASES: [&str; 3] = ["generar imagen", "dibuja", "imagen"];

/// Screen-context preamble, or `None` when no Pokémon is on screen
pub fn context_preamble(current: &CurrentPokemon) -> Option<String> {
    let name = current.name.as_deref()?;
    let types = if current.types.is_empty() {
        UNKNOWN_TYPES.to_string()
    } else {
        current.types.join(", ")
    };
    let id = current
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_TYPES.to_string());

    Some(format!(
        "Contexto de pantalla:\n\
         - Pokemon visible: {name}\n\
         - ID: {id}\n\
         - Tipos: {types}\n\
         \n\
         Instrucciones:\n\
         - Si el usuario pregunta sin especificar el nombre (ej. \"¿cuáles son sus debilidades?\"), asume que se refiere al Pokémon visible en pantalla.\n\
         - Responde breve (3-6 viñetas) y claro."
    ))
}

/// Request parts: optional preamble, then the prefixed question
pub fn compose_parts(current: &CurrentPokemon, question: &str) -> Vec<String> {
    let mut parts = Vec::with_capacity(2);
    if let Some(preamble) = context_preamble(current) {
        parts.push(preamble);
    }
    parts.push(format!("{}{}", USER_PREFIX, question.trim()));
    parts
}

/// Whether the question asks for image generation
pub fn wants_image(question: &str) -> bool {
    let lower = question.to_lowercase();
    IMAGE_PHRASES.iter().any(|p| lower.contains(p))
}

/// One-line description of the context, for headers and CLI output
pub fn context_label(current: &CurrentPokemon) -> String {
    match (&current.name, current.id) {
        (Some(name), id) => {
            let types = if current.types.is_empty() {
                String::new()
            } else {
                format!(" ({})", current.types.join(", "))
            };
            let id = id.map(|i| format!(" - id {}", i)).unwrap_or_default();
            format!("Contexto: {}{}{}", name, types, id)
        }
        (None, _) => "Contexto: sin Pokémon visible".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> CurrentPokemon {
        CurrentPokemon::new(25, "pikachu", vec!["electric".to_string()])
    }

    #[test]
    fn test_no_preamble_without_pokemon() {
        let parts = compose_parts(&CurrentPokemon::default(), "  ¿Qué es un Pokémon?  ");
        assert_eq!(parts, vec!["Usuario: ¿Qué es un Pokémon?".to_string()]);
    }

    #[test]
    fn test_preamble_names_the_pokemon() {
        let parts = compose_parts(&pikachu(), "¿cuáles son sus debilidades?");
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("Contexto de pantalla:\n"));
        assert!(parts[0].contains("- Pokemon visible: pikachu\n"));
        assert!(parts[0].contains("- ID: 25\n"));
        assert!(parts[0].contains("- Tipos: electric\n"));
        assert!(parts[0].contains("3-6 viñetas"));
        assert_eq!(parts[1], "Usuario: ¿cuáles son sus debilidades?");
    }

    #[test]
    fn test_unknown_types() {
        let current = CurrentPokemon::new(0, "missingno", vec![]);
        let preamble = context_preamble(&current).unwrap();
        assert!(preamble.contains("- Tipos: desconocido"));
    }

    #[test]
    fn test_wants_image() {
        assert!(wants_image("Dibuja a Pikachu"));
        assert!(wants_image("quiero una IMAGEN de Mew"));
        assert!(!wants_image("¿Qué come Snorlax?"));
    }

    #[test]
    fn test_context_label() {
        assert_eq!(
            context_label(&pikachu()),
            "Contexto: pikachu (electric) - id 25"
        );
        assert_eq!(
            context_label(&CurrentPokemon::default()),
            "Contexto: sin Pokémon visible"
        );
    }
}
