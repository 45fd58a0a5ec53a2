//! Resource invalidation generations.
//!
//! Mutations never patch a cached collection; they bump the resource key's
//! generation here and the owning page re-runs its loader. Loaders record
//! the generation they last loaded at, so any consumer can ask whether its
//! copy is stale without being coupled to the loader instance that holds it.

use dashmap::DashMap;

/// Well-known resource keys, one per server-owned collection.
pub mod keys {
    pub const BOOKINGS: &str = "bookings";
    pub const CONTACTS: &str = "contacts";
    pub const FORMS: &str = "forms";
    pub const INVENTORY: &str = "inventory";
    pub const INVENTORY_ALERTS: &str = "inventory.alerts";
    pub const STAFF: &str = "staff";
    pub const CONVERSATIONS: &str = "inbox.conversations";
    pub const DASHBOARD: &str = "analytics.dashboard";

    /// Messages are invalidated per conversation.
    pub fn messages(conversation_id: &str) -> String {
        format!("inbox.messages.{conversation_id}")
    }
}

/// Monotonic generation counter per resource key.
#[derive(Debug, Default)]
pub struct InvalidationBus {
    generations: DashMap<String, u64>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the generation for a key and return the new value.
    pub fn invalidate(&self, key: &str) -> u64 {
        let mut entry = self.generations.entry(key.to_string()).or_insert(0);
        *entry += 1;
        let generation = *entry;
        drop(entry);
        log::debug!("Invalidated {} (generation {})", key, generation);
        generation
    }

    /// Current generation for a key; zero if never invalidated.
    pub fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).map(|g| *g).unwrap_or(0)
    }
}
