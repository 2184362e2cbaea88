//! # Chat API
//!
//! The assistant, the shared current-Pokémon context, and the typewriter
//! stream used to reveal answers.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, BoxStream, StreamExt};
use pokedex_core::chat::render::{format_superscripts, segment_inline};
use pokedex_core::chat::{
    context_label, typewriter_stream, CurrentPokemon, Segment, TYPEWRITER_STEP, TYPEWRITER_TICK,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::ToSchema;

use super::ApiResult;
use crate::state::SharedState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// `None` when the question was blank
    pub answer: Option<String>,
    /// Answer with superscripts applied, split into inline segments
    #[schema(value_type = Vec<Object>)]
    pub segments: Vec<Segment>,
    pub context_label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContextResponse {
    #[schema(value_type = Object)]
    pub current: CurrentPokemon,
    pub label: String,
    pub chat_open: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetContextRequest {
    pub id: Option<u32>,
    /// Absent name clears the context
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub chat_open: Option<bool>,
}

pub fn chat_routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(ask))
        .route("/stream", post(ask_stream))
}

pub fn context_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_context).put(set_context))
        .route("/chat/toggle", post(toggle_chat))
}

/// Ask the assistant about the on-screen Pokémon
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer", body = ChatResponse),
        (status = 400, description = "Image generation requested", body = super::ApiResponse),
        (status = 503, description = "API key missing", body = super::ApiResponse)
    )
)]
pub async fn ask(
    State(state): State<SharedState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<ChatResponse> {
    let reply = state.assistant.ask(&req.question).await?;
    let label = match &reply {
        Some(reply) => context_label(&reply.context),
        None => context_label(&state.context.current().await),
    };
    let answer = reply.map(|r| r.answer);
    let segments = answer
        .as_deref()
        .map(|a| segment_inline(&format_superscripts(a)))
        .unwrap_or_default();

    Ok(Json(ChatResponse {
        answer,
        segments,
        context_label: label,
    }))
}

/// Same as `/chat`, revealed as `frame` events followed by `done`, or a
/// single `error` event carrying the inline message
#[utoipa::path(
    post,
    path = "/api/v1/chat/stream",
    tag = "chat",
    request_body = ChatRequest,
    responses((status = 200, description = "text/event-stream of typewriter frames"))
)]
pub async fn ask_stream(
    State(state): State<SharedState>,
    Json(req): Json<ChatRequest>,
) -> Sse<BoxStream<'static, Result<Event, Infallible>>> {
    let done = || stream::once(async { Ok::<_, Infallible>(Event::default().event("done").data("")) });

    let events: BoxStream<'static, Result<Event, Infallible>> =
        match state.assistant.ask(&req.question).await {
            Ok(Some(reply)) => {
                let text = format_superscripts(&reply.answer);
                typewriter_stream(&text, TYPEWRITER_STEP, TYPEWRITER_TICK)
                    .map(|frame| Ok::<_, Infallible>(Event::default().event("frame").data(frame)))
                    .chain(done())
                    .boxed()
            }
            Ok(None) => done().boxed(),
            Err(e) => {
                let message = e.user_message();
                stream::once(async move {
                    Ok::<_, Infallible>(Event::default().event("error").data(message))
                })
                .boxed()
            }
        };

    Sse::new(events).keep_alive(KeepAlive::default())
}

async fn context_response(state: &SharedState) -> ContextResponse {
    let current = state.context.current().await;
    ContextResponse {
        label: context_label(&current),
        chat_open: state.context.chat_open().await,
        current,
    }
}

/// Current on-screen Pokémon
#[utoipa::path(
    get,
    path = "/api/v1/context",
    tag = "chat",
    responses((status = 200, description = "Current context", body = ContextResponse))
)]
pub async fn get_context(State(state): State<SharedState>) -> Json<ContextResponse> {
    Json(context_response(&state).await)
}

/// Replace the context by hand
#[utoipa::path(
    put,
    path = "/api/v1/context",
    tag = "chat",
    request_body = SetContextRequest,
    responses((status = 200, description = "Updated context", body = ContextResponse))
)]
pub async fn set_context(
    State(state): State<SharedState>,
    Json(req): Json<SetContextRequest>,
) -> Json<ContextResponse> {
    match req.name.filter(|n| !n.trim().is_empty()) {
        Some(name) => {
            let mut current = CurrentPokemon::new(0, name.trim().to_lowercase(), req.types);
            current.id = req.id;
            state.context.set(current).await;
        }
        None => state.context.clear().await,
    }
    if let Some(open) = req.chat_open {
        state.context.set_chat_open(open).await;
    }
    Json(context_response(&state).await)
}

/// Open or close the chat panel
#[utoipa::path(
    post,
    path = "/api/v1/context/chat/toggle",
    tag = "chat",
    responses((status = 200, description = "Updated context", body = ContextResponse))
)]
pub async fn toggle_chat(State(state): State<SharedState>) -> Json<ContextResponse> {
    state.context.toggle_chat().await;
    Json(context_response(&state).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::pokemon::pokemon_routes;
    use crate::api::test_support::{
        offline_state, seeded_state, send, send_events, RecordingModel,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    fn app(state: SharedState) -> Router {
        Router::new()
            .nest("/api/v1/pokemon", pokemon_routes())
            .nest("/api/v1/chat", chat_routes())
            .nest("/api/v1/context", context_routes())
            .with_state(state)
    }

    #[tokio::test]
    async fn test_visited_pokemon_reaches_the_model() {
        let model = RecordingModel::answering("**Impactrueno** y x^2");
        let state = seeded_state(model.clone());

        let (status, _) = send(app(state.clone()), "GET", "/api/v1/pokemon/25", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, context) = send(app(state.clone()), "GET", "/api/v1/context", None).await;
        assert_eq!(context["current"]["name"], "pikachu");
        assert_eq!(context["label"], "Contexto: pikachu (electric) - id 25");

        let (status, body) = send(
            app(state),
            "POST",
            "/api/v1/chat",
            Some(json!({ "question": "¿Qué ataques aprende?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "**Impactrueno** y x^2");
        assert_eq!(body["context_label"], "Contexto: pikachu (electric) - id 25");
        assert_eq!(body["segments"][0]["kind"], "bold");
        assert_eq!(body["segments"][0]["value"], "Impactrueno");
        assert_eq!(body["segments"][1]["value"], " y x²");

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0][0].contains("Pokemon visible: pikachu"));
        assert_eq!(prompts[0][1], "Usuario: ¿Qué ataques aprende?");
    }

    #[tokio::test]
    async fn test_stream_types_out_the_answer() {
        let state = seeded_state(RecordingModel::answering("Pika pika, x^2"));
        let (status, events) = send_events(
            app(state),
            "/api/v1/chat/stream",
            json!({ "question": "¿Qué dice?" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (last, frames) = events.split_last().unwrap();
        assert_eq!(last.0, "done");
        assert!(frames.len() > 1);
        assert!(frames.iter().all(|(event, _)| event == "frame"));
        assert_eq!(frames[0].1, "Pik");
        assert_eq!(frames[frames.len() - 1].1, "Pika pika, x²");
    }

    #[tokio::test]
    async fn test_stream_reports_errors_inline() {
        let (_, events) = send_events(
            app(offline_state()),
            "/api/v1/chat/stream",
            json!({ "question": "dibuja a Mew" }),
        )
        .await;
        assert_eq!(
            events,
            vec![(
                "error".to_string(),
                "La generación de imágenes está desactivada por ahora.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_blank_question_is_noop() {
        let (status, body) = send(
            app(offline_state()),
            "POST",
            "/api/v1/chat",
            Some(json!({ "question": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["answer"].is_null());
        assert_eq!(body["context_label"], "Contexto: sin Pokémon visible");
    }

    #[tokio::test]
    async fn test_image_request_is_refused() {
        let (status, body) = send(
            app(offline_state()),
            "POST",
            "/api/v1/chat",
            Some(json!({ "question": "dibuja a Mew" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "La generación de imágenes está desactivada por ahora."
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let (status, body) = send(
            app(offline_state()),
            "POST",
            "/api/v1/chat",
            Some(json!({ "question": "¿Qué come Snorlax?" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Falta GEMINI_API_KEY en .env");
    }

    #[tokio::test]
    async fn test_put_and_clear_context() {
        let state = offline_state();
        let (_, body) = send(
            app(state.clone()),
            "PUT",
            "/api/v1/context",
            Some(json!({ "id": 25, "name": "Pikachu", "types": ["Electric"] })),
        )
        .await;
        assert_eq!(body["current"]["name"], "pikachu");
        assert_eq!(body["label"], "Contexto: pikachu (electric) - id 25");

        let (_, body) = send(app(state.clone()), "PUT", "/api/v1/context", Some(json!({}))).await;
        assert!(body["current"]["name"].is_null());

        let (_, body) = send(app(state), "POST", "/api/v1/context/chat/toggle", None).await;
        assert_eq!(body["chat_open"], true);
    }
}
