//! In-memory storage backend using DashMap.
//!
//! Items and invoices each get their own `DashMap<Uuid, serde_json::Value>`.
//! Records are stored as raw JSON so the stub stays decoupled from the
//! client's typed DTOs.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

/// Inner storage holding all DashMaps.
struct Inner {
    items: DashMap<Uuid, Value>,
    invoices: DashMap<Uuid, Value>,
}

/// Shared application state holding all in-memory stores.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                items: DashMap::new(),
                invoices: DashMap::new(),
            }),
        }
    }

    pub fn items(&self) -> &DashMap<Uuid, Value> {
        &self.inner.items
    }

    pub fn invoices(&self) -> &DashMap<Uuid, Value> {
        &self.inner.invoices
    }

    /// Seed a catalog item (tests and dev fixtures).
    pub fn seed_item(&self, id: Uuid, record: Value) {
        self.inner.items.insert(id, record);
    }

    /// Seed an invoice record verbatim (tests and dev fixtures).
    pub fn seed_invoice(&self, id: Uuid, record: Value) {
        self.inner.invoices.insert(id, record);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
