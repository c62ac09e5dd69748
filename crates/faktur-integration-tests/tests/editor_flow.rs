//! End-to-end editor flows: the draft controller and HTTP client running
//! against the in-memory stub backend over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use faktur_client::{HttpApiClient, HttpConfig, InvoiceStore};
use faktur_core::{InvoiceId, ItemRef, LineField};
use faktur_draft::{EditorSession, SubmitOutcome};
use faktur_stub::AppState;
use serde_json::json;
use uuid::Uuid;

/// Serve the stub on an ephemeral port; returns its base URL and state.
async fn spawn_stub() -> (String, AppState) {
    let state = AppState::new();
    let app = faktur_stub::router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("stub server");
    });
    (format!("http://{addr}"), state)
}

fn api_client(base_url: &str) -> Arc<HttpApiClient> {
    Arc::new(HttpApiClient::new(HttpConfig::new(base_url)).expect("client"))
}

fn seed_bolt(state: &AppState) -> ItemRef {
    let id = Uuid::new_v4();
    state.seed_item(
        id,
        json!({
            "itemId": id.to_string(),
            "itemName": "Bolt M6",
            "description": "Hex bolt, M6",
            "salesRate": 2.5,
            "discountPct": 0.0
        }),
    );
    ItemRef::from_uuid(id)
}

async fn open_add(client: &Arc<HttpApiClient>) -> EditorSession {
    EditorSession::open_add(client.clone(), client.clone())
        .await
        .with_close_notice_delay(Duration::ZERO)
}

#[tokio::test]
async fn add_invoice_end_to_end() {
    let (base_url, state) = spawn_stub().await;
    let client = api_client(&base_url);
    let bolt = seed_bolt(&state);

    let mut session = open_add(&client).await;
    assert_eq!(session.draft().invoice_number, 1);

    session.change_customer_name("Acme Traders");
    session.change_city("Lahore");
    session.change_item_reference(0, Some(bolt)).await;
    session.change_field(0, LineField::Quantity, "4");
    session.change_tax_percent("16");

    // Resolution flowed through real HTTP.
    assert_eq!(session.draft().lines[0].description, "Hex bolt, M6");
    let totals = session.totals();
    assert!((totals.subtotal - 10.0).abs() < 1e-9);
    assert!((totals.total - 11.6).abs() < 1e-9);

    let outcome = session.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Saved {
            message: "Invoice added successfully!".to_string()
        }
    );

    // The stub holds the full aggregate with positional row numbers.
    assert_eq!(state.invoices().len(), 1);
    let stored = state.invoices().iter().next().expect("stored invoice");
    assert_eq!(stored.value()["invoiceNo"], 1);
    assert_eq!(stored.value()["lines"][0]["rowNo"], 1);
    assert_eq!(stored.value()["lines"][0]["quantity"], 4.0);

    // Numbering continues from the committed record.
    let next = open_add(&client).await;
    assert_eq!(next.draft().invoice_number, 2);
}

#[tokio::test]
async fn edit_round_trip_updates_in_place() {
    let (base_url, state) = spawn_stub().await;
    let client = api_client(&base_url);
    let bolt = seed_bolt(&state);

    let mut session = open_add(&client).await;
    session.change_customer_name("Acme Traders");
    session.change_item_reference(0, Some(bolt)).await;
    session.change_field(0, LineField::Quantity, "2");
    assert!(matches!(session.submit().await, SubmitOutcome::Saved { .. }));

    let invoice_id = InvoiceId::from_uuid(
        *state.invoices().iter().next().expect("stored").key(),
    );

    let mut editor =
        EditorSession::open_edit(client.clone(), client.clone(), invoice_id)
            .await
            .expect("open edit")
            .with_close_notice_delay(Duration::ZERO);
    assert_eq!(editor.draft().customer_name, "Acme Traders");
    assert!(editor.draft().concurrency_token.is_some());

    editor.change_field(0, LineField::Quantity, "5");
    let outcome = editor.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Saved {
            message: "Invoice updated successfully!".to_string()
        }
    );

    let record = client.fetch(invoice_id).await.expect("fetch");
    assert_eq!(record.lines[0].quantity, 5.0);
    assert_eq!(state.invoices().len(), 1);
}

#[tokio::test]
async fn concurrent_edit_conflict_surfaces_server_message() {
    let (base_url, state) = spawn_stub().await;
    let client = api_client(&base_url);
    let bolt = seed_bolt(&state);

    let mut session = open_add(&client).await;
    session.change_customer_name("Acme Traders");
    session.change_item_reference(0, Some(bolt)).await;
    session.change_field(0, LineField::Quantity, "1");
    assert!(matches!(session.submit().await, SubmitOutcome::Saved { .. }));

    let invoice_id = InvoiceId::from_uuid(
        *state.invoices().iter().next().expect("stored").key(),
    );

    // Two editors load the same record and token.
    let mut first = EditorSession::open_edit(client.clone(), client.clone(), invoice_id)
        .await
        .expect("open first")
        .with_close_notice_delay(Duration::ZERO);
    let mut second = EditorSession::open_edit(client.clone(), client.clone(), invoice_id)
        .await
        .expect("open second")
        .with_close_notice_delay(Duration::ZERO);

    first.change_field(0, LineField::Quantity, "3");
    assert!(matches!(first.submit().await, SubmitOutcome::Saved { .. }));

    // The second editor's token is now stale.
    second.change_field(0, LineField::Quantity, "9");
    let outcome = second.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "Invoice was modified by another user".to_string()
        }
    );
    // No partial commit: the first editor's quantity stands.
    let record = client.fetch(invoice_id).await.expect("fetch");
    assert_eq!(record.lines[0].quantity, 3.0);

    // The draft is still editable; a reload-and-resubmit succeeds.
    let mut retry = EditorSession::open_edit(client.clone(), client.clone(), invoice_id)
        .await
        .expect("reopen")
        .with_close_notice_delay(Duration::ZERO);
    retry.change_field(0, LineField::Quantity, "9");
    assert!(matches!(retry.submit().await, SubmitOutcome::Saved { .. }));
}

#[tokio::test]
async fn duplicate_invoice_number_rejection_keeps_draft_open() {
    let (base_url, state) = spawn_stub().await;
    let client = api_client(&base_url);
    let bolt = seed_bolt(&state);

    let mut first = open_add(&client).await;
    first.change_customer_name("Acme Traders");
    first.change_item_reference(0, Some(bolt)).await;
    first.change_field(0, LineField::Quantity, "1");

    // Opened before the first save, so it computed the same number.
    let mut second = open_add(&client).await;
    second.change_customer_name("Globex");
    second.change_item_reference(0, Some(bolt)).await;
    second.change_field(0, LineField::Quantity, "2");

    assert!(matches!(first.submit().await, SubmitOutcome::Saved { .. }));
    let outcome = second.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "Invoice number 1 already exists".to_string()
        }
    );
    assert_eq!(second.draft().customer_name, "Globex");
}

#[tokio::test]
async fn unknown_item_reference_does_not_block_editing() {
    let (base_url, _state) = spawn_stub().await;
    let client = api_client(&base_url);

    let mut session = open_add(&client).await;
    let ghost = ItemRef::new();
    session.change_item_reference(0, Some(ghost)).await;

    let line = &session.draft().lines[0];
    assert_eq!(line.item_ref, Some(ghost));
    assert_eq!(line.description, "");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let (base_url, state) = spawn_stub().await;
    let client = api_client(&base_url);
    let bolt = seed_bolt(&state);

    let mut session = open_add(&client).await;
    session.change_customer_name("Acme Traders");
    session.change_item_reference(0, Some(bolt)).await;
    session.change_field(0, LineField::Quantity, "1");
    assert!(matches!(session.submit().await, SubmitOutcome::Saved { .. }));

    let invoice_id = InvoiceId::from_uuid(
        *state.invoices().iter().next().expect("stored").key(),
    );
    client.delete(invoice_id).await.expect("delete");
    assert!(state.invoices().is_empty());
    assert!(client.fetch(invoice_id).await.is_err());
}
