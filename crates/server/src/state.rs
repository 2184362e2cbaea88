//! Shared application state for the HTTP server and the CLI.

use anyhow::Context;
use pokedex_core::chat::{ChatAssistant, LanguageModel, PokemonContext};
use pokedex_core::config::DexConfig;
use pokedex_core::dex::{Pokedex, PokemonDetail, PokemonSummary};
use pokedex_core::state::{CollectionStore, DexDb};
use pokedex_core::DexResult;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: DexConfig,
    pub dex: Pokedex,
    pub collections: CollectionStore,
    pub context: PokemonContext,
    pub assistant: ChatAssistant,
    /// Last list fetch; refreshed on demand
    list_cache: RwLock<Option<Arc<Vec<PokemonSummary>>>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        config: DexConfig,
        dex: Pokedex,
        db: Arc<DexDb>,
        model: Arc<dyn LanguageModel>,
    ) -> anyhow::Result<Self> {
        let collections = CollectionStore::load(db).context("Failed to load collections")?;
        let context = PokemonContext::new();
        let assistant = ChatAssistant::new(model, context.clone());

        Ok(Self {
            config,
            dex,
            collections,
            context,
            assistant,
            list_cache: RwLock::new(None),
        })
    }

    /// Wire everything from the effective configuration
    pub fn from_config(config: DexConfig) -> anyhow::Result<Self> {
        let source = config
            .create_source()
            .context("Failed to build PokeAPI client")?;
        let dex = Pokedex::new(Arc::new(source), config.dex_options());
        let db = Arc::new(DexDb::open()?);
        let model = config
            .chat
            .create_client()
            .context("Failed to build Gemini client")?;
        if !model.has_api_key() {
            eprintln!(
                "⚠️ {} is not set; chat will answer with an error",
                config.chat.api_key_env
            );
        }
        Self::new(config, dex, db, Arc::new(model))
    }

    /// The cached list, fetching it on first use or when `refresh` is set
    pub async fn summaries(&self, refresh: bool) -> DexResult<Arc<Vec<PokemonSummary>>> {
        if !refresh {
            if let Some(cached) = self.list_cache.read().await.as_ref() {
                return Ok(Arc::clone(cached));
            }
        }

        let fresh = Arc::new(self.dex.fetch_summaries().await?);
        *self.list_cache.write().await = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// Detail visit: fetch, then publish as the on-screen Pokémon unless a
    /// newer visit started meanwhile
    pub async fn visit(&self, key: &str) -> DexResult<PokemonDetail> {
        let ticket = self.context.begin_visit().await;
        let detail = self.dex.fetch_detail(key).await?;
        self.context.publish(ticket, &detail).await;
        Ok(detail)
    }
}
