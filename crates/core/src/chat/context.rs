//! # Current Pokémon Context
//!
//! App-lifetime shared state: which Pokémon is on screen, and whether the
//! chat panel is open. The detail loader writes it, the assistant reads it.
//!
//! Writes from a detail visit are ticketed. A visit takes a ticket before it
//! starts fetching and publishes with it afterwards; if another visit (or a
//! manual `set`) started in between, the stale publish is ignored.

use crate::dex::PokemonDetail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentPokemon {
    pub id: Option<u32>,
    pub name: Option<String>,
    /// Lowercase type names
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CurrentPokemon {
    pub fn new(id: u32, name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            types: types.into_iter().map(|t| t.to_lowercase()).collect(),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn from_detail(detail: &PokemonDetail) -> Self {
        Self::new(detail.id, detail.name.clone(), detail.types.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Proof that a detail visit started; see [`PokemonContext::begin_visit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTicket(u64);

#[derive(Debug, Default)]
struct ContextState {
    current: CurrentPokemon,
    chat_open: bool,
    latest_ticket: u64,
}

/// Cloneable handle to the shared context
#[derive(Debug, Clone, Default)]
pub struct PokemonContext {
    inner: Arc<RwLock<ContextState>>,
}

impl PokemonContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> CurrentPokemon {
        self.inner.read().await.current.clone()
    }

    /// Start a detail visit. Any earlier ticket becomes stale.
    pub async fn begin_visit(&self) -> VisitTicket {
        let mut state = self.inner.write().await;
        state.latest_ticket += 1;
        VisitTicket(state.latest_ticket)
    }

    /// Publish the loaded detail if `ticket` is still the latest visit.
    /// Returns whether the context was updated.
    pub async fn publish(&self, ticket: VisitTicket, detail: &PokemonDetail) -> bool {
        let mut state = self.inner.write().await;
        if ticket.0 != state.latest_ticket {
            tracing::debug!(
                stale = ticket.0,
                latest = state.latest_ticket,
                pokemon = %detail.name,
                "Ignoring stale context publish"
            );
            return false;
        }
        state.current = CurrentPokemon::from_detail(detail);
        true
    }

    /// Overwrite the context directly. Invalidates in-flight visits.
    pub async fn set(&self, mut current: CurrentPokemon) {
        let mut state = self.inner.write().await;
        state.latest_ticket += 1;
        if current.updated_at.is_none() {
            current.updated_at = Some(Utc::now());
        }
        state.current = current;
    }

    pub async fn clear(&self) {
        self.set(CurrentPokemon::default()).await;
    }

    pub async fn chat_open(&self) -> bool {
        self.inner.read().await.chat_open
    }

    pub async fn set_chat_open(&self, open: bool) {
        self.inner.write().await.chat_open = open;
    }

    /// Flip the chat panel, returning the new state
    pub async fn toggle_chat(&self) -> bool {
        let mut state = self.inner.write().await;
        state.chat_open = !state.chat_open;
        state.chat_open
    }
}
