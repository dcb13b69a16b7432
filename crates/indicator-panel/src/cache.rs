use chrono::{DateTime, Utc};
use fiscal_core::EntityId;

use crate::PanelRun;

/// Identity of a panel computation: the year and the set of selected entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelKey {
    pub year: i32,
    entities: Vec<EntityId>,
}

impl PanelKey {
    /// Selection order and duplicates do not change the key.
    pub fn new(year: i32, entities: &[EntityId]) -> Self {
        let mut entities = entities.to_vec();
        entities.sort();
        entities.dedup();
        Self { year, entities }
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }
}

struct CacheEntry {
    key: PanelKey,
    run: PanelRun,
    computed_at: DateTime<Utc>,
}

/// Holds the most recent panel run. A different key misses; storing replaces.
#[derive(Default)]
pub struct PanelCache {
    entry: Option<CacheEntry>,
}

impl PanelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PanelKey) -> Option<&PanelRun> {
        self.entry
            .as_ref()
            .filter(|entry| &entry.key == key)
            .map(|entry| &entry.run)
    }

    pub fn store(&mut self, key: PanelKey, run: PanelRun) {
        self.entry = Some(CacheEntry { key, run, computed_at: Utc::now() });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|entry| entry.computed_at)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
