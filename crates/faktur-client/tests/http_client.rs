//! HTTP client tests against a wiremock backend.

use faktur_client::{
    HttpApiClient, HttpConfig, InvoiceLineDto, InvoiceStore, InvoiceUpdate, ItemLookup,
    NewInvoice,
};
use faktur_core::{InvoiceId, ItemRef};
use serde_json::json;
use wiremock::matchers::{body_json_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpApiClient {
    HttpApiClient::new(HttpConfig::new(server.uri())).expect("client")
}

fn new_invoice(no: u32) -> NewInvoice {
    NewInvoice {
        invoice_no: no,
        invoice_date: "2026-02-01".to_string(),
        customer_name: "Acme Traders".to_string(),
        address: "12 Canal Rd".to_string(),
        city: "Lahore".to_string(),
        tax_percentage: 16.0,
        notes: String::new(),
        lines: vec![InvoiceLineDto {
            row_no: Some(1),
            item_id: Some(ItemRef::new()),
            description: "Bolt M6".to_string(),
            quantity: 4.0,
            rate: 2.5,
            discount_pct: 0.0,
        }],
    }
}

#[tokio::test]
async fn resolve_returns_item_details() {
    let server = MockServer::start().await;
    let item = ItemRef::new();
    Mock::given(method("GET"))
        .and(path(format!("/Item/{item}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "itemId": item.as_uuid(),
            "itemName": "Bolt M6",
            "description": "Hex bolt, M6",
            "salesRate": 2.5,
            "discountPct": 5.0
        })))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .resolve(item)
        .await
        .expect("resolve ok")
        .expect("item found");
    assert_eq!(record.item_id, item);
    assert_eq!(record.description, "Hex bolt, M6");
    assert_eq!(record.sales_rate, 2.5);
    assert_eq!(record.discount_pct, 5.0);
}

#[tokio::test]
async fn resolve_maps_404_to_none() {
    let server = MockServer::start().await;
    let item = ItemRef::new();
    Mock::given(method("GET"))
        .and(path(format!("/Item/{item}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolved = client_for(&server).resolve(item).await.expect("resolve ok");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn list_and_fetch_decode_backend_shapes() {
    let server = MockServer::start().await;
    let id = InvoiceId::new();
    Mock::given(method("GET"))
        .and(path("/Invoice/GetList"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"invoiceId": id.as_uuid(), "invoiceNo": 12, "customerName": "Acme"},
            {"invoiceId": InvoiceId::new().as_uuid(), "invoiceNo": "legacy-3"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/Invoice/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoiceNo": 12,
            "invoiceDate": "2026-02-01T00:00:00",
            "customerName": "Acme",
            "taxPercentage": 0.0,
            "updatedOn": "2026-02-03T10:11:12",
            "lines": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let summaries = client.list().await.expect("list ok");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].invoice_no.as_u32(), Some(12));
    assert_eq!(summaries[1].invoice_no.as_u32(), None);

    let record = client.fetch(id).await.expect("fetch ok");
    assert_eq!(record.customer_name, "Acme");
    assert_eq!(record.updated_on.as_deref(), Some("2026-02-03T10:11:12"));
}

#[tokio::test]
async fn create_posts_payload_and_decodes_id() {
    let server = MockServer::start().await;
    let created = InvoiceId::new();
    Mock::given(method("POST"))
        .and(path("/Invoice"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"invoiceId": created.as_uuid()})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create(&new_invoice(13))
        .await
        .expect("create ok");
    assert_eq!(result.invoice_id, created);
}

#[tokio::test]
async fn rejected_create_surfaces_string_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Invoice"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!("Invoice number 13 already exists")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create(&new_invoice(13))
        .await
        .expect_err("must fail");
    assert_eq!(err.user_message(), "Invoice number 13 already exists");
}

#[tokio::test]
async fn stale_update_surfaces_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/Invoice"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Invoice was modified by another user"
        })))
        .mount(&server)
        .await;

    let update = InvoiceUpdate {
        invoice: new_invoice(13),
        invoice_id: InvoiceId::new(),
        updated_on: Some("stale-token".to_string()),
    };
    let err = client_for(&server)
        .update(&update)
        .await
        .expect_err("must conflict");
    assert_eq!(err.user_message(), "Invoice was modified by another user");
}

#[tokio::test]
async fn delete_targets_the_record() {
    let server = MockServer::start().await;
    let id = InvoiceId::new();
    Mock::given(method("DELETE"))
        .and(path(format!("/Invoice/{id}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete(id).await.expect("delete ok");
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Invoice/GetList"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(
        HttpConfig::new(server.uri()).with_bearer_token("s3cret"),
    )
    .expect("client");
    client.list().await.expect("list ok");
}

#[tokio::test]
async fn update_payload_round_trips_token_verbatim() {
    let server = MockServer::start().await;
    let update = InvoiceUpdate {
        invoice: NewInvoice {
            invoice_no: 9,
            invoice_date: "2026-02-01".to_string(),
            customer_name: "Acme".to_string(),
            address: String::new(),
            city: String::new(),
            tax_percentage: 0.0,
            notes: String::new(),
            lines: vec![],
        },
        invoice_id: InvoiceId::new(),
        updated_on: Some("2026-02-03T10:11:12.345".to_string()),
    };
    let expected = serde_json::to_string(&update).expect("serialize");
    Mock::given(method("PUT"))
        .and(path("/Invoice"))
        .and(body_json_string(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).update(&update).await.expect("update ok");
}
