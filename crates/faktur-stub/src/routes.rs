//! Route definitions for the invoicing backend stub.
//!
//! Implements the endpoints the `faktur-client` HTTP adapter calls, with
//! responses that deserialize cleanly into the client's types (camelCase
//! JSON, correct field shapes). Failure bodies deliberately exercise both
//! ends of the client's message decoding: duplicate invoice numbers come
//! back as a plain JSON string, stale-token conflicts as an object with a
//! `message` field.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::store::AppState;

/// Build the complete router with all invoicing stub routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/Item/:id", get(item_get))
        .route("/Invoice/GetList", get(invoice_list))
        .route("/Invoice", post(invoice_create).put(invoice_update))
        .route("/Invoice/:id", get(invoice_get).delete(invoice_delete))
        .fallback(not_implemented)
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn not_implemented() -> Response {
    (StatusCode::NOT_IMPLEMENTED, "not implemented by faktur-stub").into_response()
}

// ── Items ───────────────────────────────────────────────────────────

async fn item_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.items().get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// ── Invoices ────────────────────────────────────────────────────────

async fn invoice_list(State(state): State<AppState>) -> Response {
    let summaries: Vec<Value> = state
        .invoices()
        .iter()
        .map(|entry| {
            let record = entry.value();
            json!({
                "invoiceId": entry.key().to_string(),
                "invoiceNo": record.get("invoiceNo"),
                "customerName": record.get("customerName"),
                "invoiceDate": record.get("invoiceDate"),
            })
        })
        .collect();
    Json(summaries).into_response()
}

async fn invoice_get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.invoices().get(&id) {
        Some(record) => Json(record.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn invoice_create(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let invoice_no = body.get("invoiceNo").cloned().unwrap_or(Value::Null);
    if invoice_number_taken(&state, &invoice_no, None) {
        return (
            StatusCode::BAD_REQUEST,
            Json(format!("Invoice number {invoice_no} already exists")),
        )
            .into_response();
    }

    let id = Uuid::new_v4();
    let mut record = body;
    set_field(&mut record, "invoiceId", json!(id.to_string()));
    set_field(&mut record, "updatedOn", json!(Utc::now().to_rfc3339()));
    state.invoices().insert(id, record);

    tracing::debug!(%id, "invoice created");
    (StatusCode::CREATED, Json(json!({ "invoiceId": id.to_string() }))).into_response()
}

async fn invoice_update(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(id) = body
        .get("invoiceID")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
    else {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "invoiceID is required"})))
            .into_response();
    };

    let Some(existing) = state.invoices().get(&id).map(|r| r.clone()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    // Optimistic concurrency: the carried token must match the stored one.
    let stored_token = existing.get("updatedOn").cloned().unwrap_or(Value::Null);
    let carried_token = body.get("updatedOn").cloned().unwrap_or(Value::Null);
    if stored_token != carried_token {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "Invoice was modified by another user"})),
        )
            .into_response();
    }

    let invoice_no = body.get("invoiceNo").cloned().unwrap_or(Value::Null);
    if invoice_number_taken(&state, &invoice_no, Some(id)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(format!("Invoice number {invoice_no} already exists")),
        )
            .into_response();
    }

    let mut record = body;
    set_field(&mut record, "updatedOn", json!(Utc::now().to_rfc3339()));
    state.invoices().insert(id, record);

    tracing::debug!(%id, "invoice updated");
    StatusCode::OK.into_response()
}

async fn invoice_delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.invoices().remove(&id) {
        Some(_) => StatusCode::OK.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn invoice_number_taken(state: &AppState, invoice_no: &Value, exclude: Option<Uuid>) -> bool {
    if invoice_no.is_null() {
        return false;
    }
    state.invoices().iter().any(|entry| {
        Some(*entry.key()) != exclude && entry.value().get("invoiceNo") == Some(invoice_no)
    })
}

fn set_field(record: &mut Value, key: &str, value: Value) {
    if let Some(map) = record.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}
