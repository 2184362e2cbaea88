//! # Chat
//!
//! The on-screen assistant: shared current-Pokémon context, prompt
//! composition, the Gemini client and answer rendering.

pub mod assistant;
pub mod context;
pub mod gemini;
pub mod prompt;
pub mod render;

pub use assistant::{ChatAssistant, ChatReply, EXAMPLE_QUESTIONS};
pub use context::{CurrentPokemon, PokemonContext, VisitTicket};
pub use gemini::{GeminiClient, LanguageModel};
pub use prompt::{compose_parts, context_label, context_preamble, wants_image};
pub use render::{
    render_answer, styled_stream, typewriter_stream, Segment, TYPEWRITER_STEP, TYPEWRITER_TICK,
};
