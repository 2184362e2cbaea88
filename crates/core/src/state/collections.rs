//! # Collections
//!
//! Favorites and captured Pokémon: two sets of ids, loaded once and
//! rewritten wholesale to the key-value store on every mutation.

use super::db::DexDb;
use crate::error::DexResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Favorites,
    Captured,
}

impl CollectionKind {
    pub fn all() -> [CollectionKind; 2] {
        [CollectionKind::Favorites, CollectionKind::Captured]
    }

    /// Storage key
    pub fn key(&self) -> &'static str {
        match self {
            CollectionKind::Favorites => "favorites",
            CollectionKind::Captured => "captured",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Default)]
struct Sets {
    favorites: BTreeSet<u32>,
    captured: BTreeSet<u32>,
}

impl Sets {
    fn get(&self, kind: CollectionKind) -> &BTreeSet<u32> {
        match kind {
            CollectionKind::Favorites => &self.favorites,
            CollectionKind::Captured => &self.captured,
        }
    }

    fn get_mut(&mut self, kind: CollectionKind) -> &mut BTreeSet<u32> {
        match kind {
            CollectionKind::Favorites => &mut self.favorites,
            CollectionKind::Captured => &mut self.captured,
        }
    }
}

/// Shared handle over both collections
pub struct CollectionStore {
    db: Arc<DexDb>,
    sets: Mutex<Sets>,
}

impl CollectionStore {
    /// Read both sets from storage. A missing key is an empty set; an
    /// unreadable value is logged and treated as empty.
    pub fn load(db: Arc<DexDb>) -> DexResult<Self> {
        let mut sets = Sets::default();
        for kind in CollectionKind::all() {
            if let Some(raw) = db.kv_get(kind.key())? {
                *sets.get_mut(kind) = parse_ids(kind, &raw);
            }
        }

        tracing::info!(
            favorites = sets.favorites.len(),
            captured = sets.captured.len(),
            "Collections loaded"
        );

        Ok(Self {
            db,
            sets: Mutex::new(sets),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Sets> {
        self.sets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, kind: CollectionKind, id: u32) -> bool {
        self.lock().get(kind).contains(&id)
    }

    /// Ids in ascending order
    pub fn ids(&self, kind: CollectionKind) -> Vec<u32> {
        self.lock().get(kind).iter().copied().collect()
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle(&self, kind: CollectionKind, id: u32) -> DexResult<bool> {
        let mut sets = self.lock();
        let mut next = sets.get(kind).clone();
        let member = if next.remove(&id) {
            false
        } else {
            next.insert(id);
            true
        };

        self.persist(kind, &next)?;
        *sets.get_mut(kind) = next;

        tracing::debug!(%kind, id, member, "Collection toggled");
        Ok(member)
    }

    /// Force membership. Writes only when something changed; returns
    /// whether it did.
    pub fn set(&self, kind: CollectionKind, id: u32, member: bool) -> DexResult<bool> {
        let mut sets = self.lock();
        if sets.get(kind).contains(&id) == member {
            return Ok(false);
        }

        let mut next = sets.get(kind).clone();
        if member {
            next.insert(id);
        } else {
            next.remove(&id);
        }

        self.persist(kind, &next)?;
        *sets.get_mut(kind) = next;
        Ok(true)
    }

    fn persist(&self, kind: CollectionKind, ids: &BTreeSet<u32>) -> DexResult<()> {
        let value = serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string());
        self.db.kv_set(kind.key(), &value)
    }
}

fn parse_ids(kind: CollectionKind, raw: &str) -> BTreeSet<u32> {
    match serde_json::from_str::<Vec<u32>>(raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            tracing::warn!(%kind, error = %e, "Ignoring unreadable collection");
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Arc<DexDb>, CollectionStore) {
        let db = Arc::new(DexDb::open_in_memory().unwrap());
        let store = CollectionStore::load(db.clone()).unwrap();
        (db, store)
    }

    #[test]
    fn test_starts_empty() {
        let (_, store) = store();
        assert!(store.ids(CollectionKind::Favorites).is_empty());
        assert!(store.ids(CollectionKind::Captured).is_empty());
    }

    #[test]
    fn test_double_toggle_restores_set() {
        let (_, store) = store();
        store.toggle(CollectionKind::Favorites, 4).unwrap();
        let before = store.ids(CollectionKind::Favorites);

        assert!(store.toggle(CollectionKind::Favorites, 25).unwrap());
        assert!(!store.toggle(CollectionKind::Favorites, 25).unwrap());
        assert_eq!(store.ids(CollectionKind::Favorites), before);
    }

    #[test]
    fn test_set_is_idempotent() {
        let (_, store) = store();
        assert!(store.set(CollectionKind::Captured, 150, true).unwrap());
        assert!(!store.set(CollectionKind::Captured, 150, true).unwrap());
        assert_eq!(store.ids(CollectionKind::Captured), vec![150]);

        assert!(store.set(CollectionKind::Captured, 150, false).unwrap());
        assert!(!store.set(CollectionKind::Captured, 150, false).unwrap());
        assert!(!store.contains(CollectionKind::Captured, 150));
    }

    #[test]
    fn test_mutation_persists_only_that_set() {
        let (db, store) = store();
        store.toggle(CollectionKind::Captured, 7).unwrap();
        store.toggle(CollectionKind::Captured, 1).unwrap();

        assert_eq!(db.kv_get("captured").unwrap().as_deref(), Some("[1,7]"));
        assert_eq!(db.kv_get("favorites").unwrap(), None);
    }

    #[test]
    fn test_reload_reads_persisted_sets() {
        let (db, store) = store();
        store.toggle(CollectionKind::Favorites, 6).unwrap();
        drop(store);

        let reloaded = CollectionStore::load(db).unwrap();
        assert!(reloaded.contains(CollectionKind::Favorites, 6));
    }

    #[test]
    fn test_unreadable_value_is_empty() {
        let db = Arc::new(DexDb::open_in_memory().unwrap());
        db.kv_set("favorites", "not json").unwrap();
        let store = CollectionStore::load(db).unwrap();
        assert!(store.ids(CollectionKind::Favorites).is_empty());
    }

    #[test]
    fn test_kinds_are_independent() {
        let (_, store) = store();
        store.toggle(CollectionKind::Favorites, 25).unwrap();
        assert!(store.contains(CollectionKind::Favorites, 25));
        assert!(!store.contains(CollectionKind::Captured, 25));
    }
}
