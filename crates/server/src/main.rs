//! Pokédex Server
//!
//! Axum server exposing the Pokédex as JSON routes, plus CLI subcommands for
//! browsing, collections and the chat assistant from a terminal.

mod api;
mod cli;
mod state;

use axum::{
    body::Body,
    http::{header, Response, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use pokedex_core::chat::{
    context_label, render_answer, styled_stream, TYPEWRITER_STEP, TYPEWRITER_TICK,
};
use pokedex_core::config::DexConfig;
use pokedex_core::dex::ListFilter;
use pokedex_core::state::CollectionKind;
use std::io::Write;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use utoipa::OpenApi;

use crate::state::{AppState, SharedState};

#[derive(Parser, Clone)]
#[command(author, version, about = "Pokédex - PokeAPI browser with an on-screen assistant")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
    /// List Pokémon, optionally filtered
    List {
        /// Name or id substring
        #[arg(short, long)]
        query: Option<String>,
        /// Generation bucket (1-9)
        #[arg(short, long)]
        generation: Option<u8>,
        /// Type name, e.g. "fire"
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Only captured
        #[arg(long)]
        captured: bool,
    },
    /// Show a Pokémon's detail
    Show {
        /// National id or API name
        id: String,
    },
    /// Toggle a favorite
    Favorite { id: u32 },
    /// Toggle a captured mark
    Capture { id: u32 },
    /// Ask the assistant
    Ask {
        /// Pokémon to put on screen first (id or name)
        #[arg(short, long)]
        pokemon: Option<String>,
        /// Print the answer at once instead of typing it out
        #[arg(long)]
        instant: bool,
        /// The question
        #[arg(required = true)]
        question: Vec<String>,
    },
}

// === OpenAPI Definition ===

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pokédex API",
        version = "1.0.0",
        description = "PokeAPI-backed Pokédex with favorites, captures and a context-aware assistant"
    ),
    paths(
        api::pokemon::list_pokemon,
        api::pokemon::get_pokemon,
        api::pokemon::get_catalog,
        api::collections::list_favorites,
        api::collections::toggle_favorite,
        api::collections::list_captured,
        api::collections::toggle_captured,
        api::chat::ask,
        api::chat::ask_stream,
        api::chat::get_context,
        api::chat::set_context,
        api::chat::toggle_chat,
        api::config::get_config,
        api::config::update_config
    ),
    components(
        schemas(
            api::ApiResponse,
            api::pokemon::ListItem,
            api::pokemon::ListResponse,
            api::pokemon::StatView,
            api::pokemon::DetailResponse,
            api::pokemon::TypeInfo,
            api::pokemon::GenerationInfo,
            api::pokemon::CatalogResponse,
            api::collections::CollectionResponse,
            api::collections::ToggleResponse,
            api::chat::ChatRequest,
            api::chat::ChatResponse,
            api::chat::ContextResponse,
            api::chat::SetContextRequest,
            api::config::ConfigPatch,
            api::config::ConfigResponse
        )
    ),
    tags(
        (name = "pokemon", description = "List, detail and catalogs"),
        (name = "collections", description = "Favorites and captured"),
        (name = "chat", description = "Assistant and on-screen context"),
        (name = "config", description = "Configuration management")
    )
)]
struct ApiDoc;

async fn serve_openapi() -> impl IntoResponse {
    let spec = ApiDoc::openapi().to_json().unwrap_or_default();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        spec,
    )
}

async fn not_found() -> Response<Body> {
    let mut response = Response::new(Body::from("Not Found"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

fn app(state: SharedState) -> Router {
    Router::new()
        .nest("/api/v1/pokemon", api::pokemon::pokemon_routes())
        .nest("/api/v1/favorites", api::collections::favorites_routes())
        .nest("/api/v1/captured", api::collections::captured_routes())
        .nest("/api/v1/chat", api::chat::chat_routes())
        .nest("/api/v1/context", api::chat::context_routes())
        .nest("/api/v1/config", api::config::config_routes())
        .route("/api/v1/catalog", get(api::pokemon::get_catalog))
        .route("/api/v1/openapi.json", get(serve_openapi))
        .fallback(not_found)
        .with_state(state)
}

// === Server Entry ===

async fn run_server(state: SharedState, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("🚀 Pokédex Server running at http://{}", addr);
    println!("   API v1 Routes:");
    println!("   Pokémon:     /api/v1/pokemon?q=&generation=&type=, /api/v1/pokemon/:id");
    println!("   Favorites:   /api/v1/favorites, /:id/toggle");
    println!("   Captured:    /api/v1/captured, /:id/toggle");
    println!("   Chat:        /api/v1/chat, /api/v1/chat/stream (SSE)");
    println!("   Context:     /api/v1/context (GET, PUT)");
    println!("   Config:      /api/v1/config (GET, PATCH)");
    println!("   Catalog:     /api/v1/catalog");
    println!("   OpenAPI:     /api/v1/openapi.json");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn run_list(
    state: &AppState,
    filter: ListFilter,
    favorites: bool,
    captured: bool,
) -> anyhow::Result<()> {
    let all = match state.summaries(false).await {
        Ok(all) => all,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(());
        }
    };

    let mut shown = 0;
    for summary in filter.apply(&all) {
        let is_favorite = state.collections.contains(CollectionKind::Favorites, summary.id);
        let is_captured = state.collections.contains(CollectionKind::Captured, summary.id);
        if (favorites && !is_favorite) || (captured && !is_captured) {
            continue;
        }
        println!("{}", cli::summary_line(summary, is_favorite, is_captured));
        shown += 1;
    }
    println!("\n{} de {} Pokémon", shown, all.len());
    Ok(())
}

async fn run_show(state: &AppState, key: &str) -> anyhow::Result<()> {
    match state.visit(&key.trim().to_lowercase()).await {
        Ok(detail) => {
            let favorite = state.collections.contains(CollectionKind::Favorites, detail.id);
            let captured = state.collections.contains(CollectionKind::Captured, detail.id);
            println!("{}", cli::detail_block(&detail, favorite, captured));
        }
        Err(e) => eprintln!("❌ {}", e.user_message()),
    }
    Ok(())
}

fn run_toggle(state: &AppState, kind: CollectionKind, id: u32) -> anyhow::Result<()> {
    let member = state.collections.toggle(kind, id)?;
    let verb = if member { "added to" } else { "removed from" };
    println!("✅ #{:03} {} {}", id, verb, kind);
    println!("   {}: {:?}", kind, state.collections.ids(kind));
    Ok(())
}

async fn run_ask(
    state: &AppState,
    pokemon: Option<String>,
    question: &str,
    instant: bool,
) -> anyhow::Result<()> {
    if let Some(key) = pokemon {
        if let Err(e) = state.visit(&key.trim().to_lowercase()).await {
            eprintln!("⚠️ {}", e.user_message());
        }
    }
    println!("{}", context_label(&state.context.current().await));

    let reply = match state.assistant.ask(question).await {
        Ok(Some(reply)) => reply,
        Ok(None) => return Ok(()),
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(());
        }
    };

    if instant {
        println!("{}", render_answer(&reply.answer));
        return Ok(());
    }

    let mut deltas = styled_stream(&reply.answer, TYPEWRITER_STEP, TYPEWRITER_TICK);
    let mut stdout = std::io::stdout();
    while let Some(delta) = deltas.next().await {
        write!(stdout, "{}", delta)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = DexConfig::load().await;
    let state: SharedState = Arc::new(AppState::from_config(config)?);

    match args.command {
        Some(CliCommand::List {
            query,
            generation,
            type_name,
            favorites,
            captured,
        }) => {
            let filter = ListFilter {
                query,
                generation,
                type_name: type_name.map(|t| t.to_lowercase()),
            };
            run_list(&state, filter, favorites, captured).await
        }
        Some(CliCommand::Show { id }) => run_show(&state, &id).await,
        Some(CliCommand::Favorite { id }) => run_toggle(&state, CollectionKind::Favorites, id),
        Some(CliCommand::Capture { id }) => run_toggle(&state, CollectionKind::Captured, id),
        Some(CliCommand::Ask {
            pokemon,
            instant,
            question,
        }) => run_ask(&state, pokemon, &question.join(" "), instant).await,
        Some(CliCommand::Serve { port }) => {
            print_banner();
            run_server(state, port).await
        }
        None => {
            print_banner();
            run_server(state, 8080).await
        }
    }
}

fn print_banner() {
    println!("╔══════════════════════════════════════╗");
    println!("║            POKÉDEX SERVER            ║");
    println!("╚══════════════════════════════════════╝");
}
