//! # faktur-draft — Invoice Draft Controller
//!
//! Orchestrates an invoice editing session end-to-end: opening in add or
//! edit mode, row and header edits with synchronous recomputation,
//! asynchronous item resolution with stale-result discarding, and
//! all-or-nothing submission through the persistence adapter.
//!
//! ## Concurrency Model
//!
//! Single-threaded and cooperative: field edits apply synchronously;
//! suspension happens only at the network seams (item resolution, list
//! fetch for numbering, final submission). The only place stale results
//! must be discarded is item resolution — a [`session::ResolutionRequest`]
//! is applied only if its row still references the item that triggered it.
//! There is no cancellation: an in-flight resolution can only be
//! superseded, a submission only left to complete.

pub mod session;

pub use session::{EditorSession, ResolutionRequest, SubmitOutcome};
