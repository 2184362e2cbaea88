//! # Chat Assistant
//!
//! Stateless question answering with the on-screen Pokémon injected as
//! context. Every turn is a single request; nothing is remembered between
//! turns.

use super::context::{CurrentPokemon, PokemonContext};
use super::gemini::LanguageModel;
use super::prompt::{compose_parts, wants_image};
use crate::error::{DexError, DexResult};
use serde::Serialize;
use std::sync::Arc;

/// Suggestions offered on an empty chat
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "¿Cuáles son las evoluciones de Pikachu?",
    "¿Dime datos curiosos de Bulbasaur?",
    "Explícame el tipo dragón",
    "Cómo armar un equipo balanceado para Kanto",
];

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub question: String,
    pub answer: String,
    /// Context the answer was generated against
    pub context: CurrentPokemon,
}

#[derive(Clone)]
pub struct ChatAssistant {
    model: Arc<dyn LanguageModel>,
    context: PokemonContext,
}

impl ChatAssistant {
    pub fn new(model: Arc<dyn LanguageModel>, context: PokemonContext) -> Self {
        Self { model, context }
    }

    pub fn context(&self) -> &PokemonContext {
        &self.context
    }

    /// Answer one question. A blank question is a no-op and returns `None`.
    #[tracing::instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn ask(&self, question: &str) -> DexResult<Option<ChatReply>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        if wants_image(question) {
            return Err(DexError::ImagesDisabled);
        }

        let context = self.context.current().await;
        let parts = compose_parts(&context, question);

        let answer = self.model.generate(&parts).await.map_err(|e| {
            tracing::warn!(error = %e, "Chat request failed");
            e
        })?;

        tracing::info!(
            pokemon = context.name.as_deref().unwrap_or("-"),
            answer_len = answer.len(),
            "Chat answered"
        );

        Ok(Some(ChatReply {
            question: question.to_string(),
            answer,
            context,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and replies with a canned answer
    struct EchoModel {
        prompts: Mutex<Vec<Vec<String>>>,
        reply: DexResult<String>,
    }

    impl EchoModel {
        fn answering(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            }
        }

        fn blocked() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(DexError::Blocked {
                    reason: "SAFETY".to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn generate(&self, parts: &[String]) -> DexResult<String> {
            self.prompts.lock().unwrap().push(parts.to_vec());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(DexError::Blocked { reason }) => Err(DexError::Blocked {
                    reason: reason.clone(),
                }),
                Err(_) => Err(DexError::EmptyResponse),
            }
        }
    }

    #[tokio::test]
    async fn test_blank_question_sends_nothing() {
        let model = Arc::new(EchoModel::answering("hola"));
        let assistant = ChatAssistant::new(model.clone(), PokemonContext::new());
        assert!(assistant.ask("   ").await.unwrap().is_none());
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_context_is_injected() {
        let model = Arc::new(EchoModel::answering("- Débil a tierra"));
        let context = PokemonContext::new();
        context
            .set(CurrentPokemon::new(25, "pikachu", vec!["electric".to_string()]))
            .await;
        let assistant = ChatAssistant::new(model.clone(), context);

        let reply = assistant
            .ask("¿cuáles son sus debilidades?")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.answer, "- Débil a tierra");
        assert_eq!(reply.context.id, Some(25));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0][0].contains("pikachu"));
        assert_eq!(prompts[0][1], "Usuario: ¿cuáles son sus debilidades?");
    }

    #[tokio::test]
    async fn test_turns_are_stateless() {
        let model = Arc::new(EchoModel::answering("ok"));
        let assistant = ChatAssistant::new(model.clone(), PokemonContext::new());
        assistant.ask("primera").await.unwrap();
        assistant.ask("segunda").await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts[1], vec!["Usuario: segunda".to_string()]);
    }

    #[tokio::test]
    async fn test_image_requests_are_refused_locally() {
        let model = Arc::new(EchoModel::answering("never"));
        let assistant = ChatAssistant::new(model.clone(), PokemonContext::new());
        let err = assistant.ask("dibuja un Charizard").await.unwrap_err();
        assert!(matches!(err, DexError::ImagesDisabled));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blocked_prompt_surfaces_inline_message() {
        let assistant = ChatAssistant::new(Arc::new(EchoModel::blocked()), PokemonContext::new());
        let err = assistant.ask("algo").await.unwrap_err();
        assert_eq!(err.user_message(), "Prompt bloqueado: SAFETY");
    }
}
