//! # faktur-client — Invoicing Backend Client
//!
//! The collaborator contracts the invoice editor depends on — item
//! catalog lookup and invoice persistence — as object-safe async traits,
//! plus the production reqwest implementation against the invoicing
//! REST backend.
//!
//! ## Architecture
//!
//! [`HttpApiClient`] wraps a `reqwest::Client` with the backend base URL,
//! bearer authentication, and request/response mapping. It is `Send +
//! Sync` and designed to be shared via `Arc` across async tasks; one
//! instance implements both adapter traits.
//!
//! ## Error Handling
//!
//! HTTP failures map to [`ClientError`] with diagnostic context (endpoint,
//! HTTP status, response body excerpt). Server-rejected submissions decode
//! into a single user-visible message via [`ClientError::user_message`].
//!
//! ## Retry
//!
//! There is none. A failed submission is reported and the draft stays
//! editable; the user resubmits.

pub mod adapter;
pub mod error;
pub mod http;
pub mod types;

pub use adapter::{InvoiceStore, ItemLookup};
pub use error::ClientError;
pub use http::{HttpApiClient, HttpConfig};
pub use types::{
    CreatedInvoice, InvoiceLineDto, InvoiceNo, InvoiceRecord, InvoiceSummary, InvoiceUpdate,
    ItemRecord, NewInvoice,
};
