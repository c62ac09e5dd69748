//! # Adapter Traits
//!
//! The two collaborator seams of the invoice editor, as object-safe
//! async traits. The editor core never talks HTTP directly — it holds
//! `Arc<dyn ItemLookup>` / `Arc<dyn InvoiceStore>` and the composition
//! root decides whether those are the real [`crate::HttpApiClient`] or
//! test doubles.
//!
//! Implementations must be `Send + Sync` so they can be shared across
//! async tasks behind an `Arc`.

use async_trait::async_trait;
use faktur_core::{InvoiceId, ItemRef};

use crate::error::ClientError;
use crate::types::{CreatedInvoice, InvoiceRecord, InvoiceSummary, InvoiceUpdate, ItemRecord, NewInvoice};

/// Resolve a catalog item reference to its canonical details.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    /// Fetch the item's description, sales rate, and discount percent.
    ///
    /// `Ok(None)` means the reference is unknown to the catalog — a
    /// non-blocking condition for the editor (the row is left partially
    /// unresolved).
    async fn resolve(&self, item: ItemRef) -> Result<Option<ItemRecord>, ClientError>;
}

/// Persistence operations over the invoice aggregate.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All invoices, used for numbering and grid refresh.
    async fn list(&self) -> Result<Vec<InvoiceSummary>, ClientError>;

    /// One invoice with its full line set.
    async fn fetch(&self, id: InvoiceId) -> Result<InvoiceRecord, ClientError>;

    /// Create a new invoice. The whole aggregate commits or nothing does.
    async fn create(&self, invoice: &NewInvoice) -> Result<CreatedInvoice, ClientError>;

    /// Update an existing invoice. Fails with a conflict-style error when
    /// the carried concurrency token is stale.
    async fn update(&self, invoice: &InvoiceUpdate) -> Result<(), ClientError>;

    /// Delete an invoice by id.
    async fn delete(&self, id: InvoiceId) -> Result<(), ClientError>;
}
