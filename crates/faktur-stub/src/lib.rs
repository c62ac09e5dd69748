//! # faktur-stub — In-Memory Invoicing Backend
//!
//! Stub implementation of the invoicing REST endpoints that
//! `faktur-client` calls, for development and testing without a real
//! backend. Storage is in-memory (DashMap) with no persistence — data is
//! lost on restart.
//!
//! Integration tests mount [`routes::router`] directly or serve it on an
//! ephemeral port; the `faktur-stub` binary runs it standalone.

pub mod routes;
pub mod store;

pub use routes::router;
pub use store::AppState;
