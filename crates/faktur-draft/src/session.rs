//! # Editor Session
//!
//! The stateful controller behind the invoice editor dialog. It owns the
//! [`InvoiceDraft`] exclusively, mirrors field-level error state for the
//! presentation layer, and talks to the backend only through the adapter
//! traits so tests can substitute doubles.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use faktur_client::{
    ClientError, InvoiceLineDto, InvoiceStore, InvoiceUpdate, ItemLookup, ItemRecord, NewInvoice,
};
use faktur_core::{
    validate, DraftMode, HeaderError, InvoiceDraft, InvoiceId, ItemRef, LineErrors, LineField,
    Totals, ValidationReport,
};

/// How long a successful save stays visible before the session signals
/// the caller to close and refresh.
pub const SAVE_NOTICE_DELAY: Duration = Duration::from_secs(1);

/// Outcome of a submission attempt.
///
/// Only `Saved` closes the dialog; the draft stays open and editable for
/// the other two. In every case `message` is the single toast-level text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The whole invoice was accepted; caller should close and refresh.
    Saved { message: String },
    /// Client-side validation failed; field errors are populated.
    Invalid { message: String },
    /// The server rejected the submission (or transport failed).
    Rejected { message: String },
}

/// A pending item resolution: which row asked, and for which item.
///
/// Applying the eventual [`ItemRecord`] goes through
/// [`EditorSession::apply_resolution`], which discards the result if the
/// row has moved on to a different item in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionRequest {
    index: usize,
    item: ItemRef,
}

/// The invoice editing session.
pub struct EditorSession {
    draft: InvoiceDraft,
    header_errors: Vec<HeaderError>,
    line_errors: Vec<LineErrors>,
    items: Arc<dyn ItemLookup>,
    store: Arc<dyn InvoiceStore>,
    close_notice_delay: Duration,
}

impl EditorSession {
    /// Open a fresh draft in add mode.
    ///
    /// The next invoice number is derived from the current list:
    /// `max(numeric invoice numbers) + 1`, falling back to 1 when the
    /// list is empty, holds no numeric numbers, or cannot be fetched
    /// (the server has the final say on numbering either way).
    pub async fn open_add(items: Arc<dyn ItemLookup>, store: Arc<dyn InvoiceStore>) -> Self {
        let number = match store.list().await {
            Ok(invoices) => next_invoice_number(
                invoices.iter().filter_map(|summary| summary.invoice_no.as_u32()),
            ),
            Err(e) => {
                tracing::warn!("failed to fetch invoice list for numbering: {e}");
                1
            }
        };

        let draft = InvoiceDraft::new_add(number, chrono::Local::now().date_naive());
        let line_count = draft.lines.len();
        Self {
            draft,
            header_errors: Vec::new(),
            line_errors: vec![LineErrors::default(); line_count],
            items,
            store,
            close_notice_delay: SAVE_NOTICE_DELAY,
        }
    }

    /// Open an existing invoice in edit mode.
    ///
    /// Hydration canonicalizes the date to `YYYY-MM-DD`, recomputes each
    /// line amount from the loaded quantity/rate/discount (amounts are
    /// never trusted from storage), and keeps the concurrency token for
    /// the eventual update.
    pub async fn open_edit(
        items: Arc<dyn ItemLookup>,
        store: Arc<dyn InvoiceStore>,
        invoice_id: InvoiceId,
    ) -> Result<Self, ClientError> {
        let record = store.fetch(invoice_id).await?;

        let mut draft = InvoiceDraft::new_add(
            record.invoice_no.as_u32().unwrap_or(0),
            chrono::Local::now().date_naive(),
        );
        draft.mode = DraftMode::Edit { invoice_id };
        draft.set_invoice_date(parse_backend_date(&record.invoice_date));
        draft.set_customer_name(&record.customer_name);
        draft.set_address(&record.address);
        draft.set_city(&record.city);
        draft.set_notes(&record.notes);
        draft.set_tax_percent(&record.tax_percentage.to_string());
        draft.concurrency_token = record.updated_on;

        draft.lines.clear();
        for dto in &record.lines {
            draft.push_blank_line();
            let index = draft.lines.len() - 1;
            draft.lines[index].item_ref = dto.item_id;
            draft.set_line_field(index, LineField::Description, &dto.description);
            draft.set_line_field(index, LineField::Quantity, &dto.quantity.to_string());
            draft.set_line_field(index, LineField::Rate, &dto.rate.to_string());
            draft.set_line_field(
                index,
                LineField::DiscountPercent,
                &dto.discount_pct.to_string(),
            );
        }

        let line_count = draft.lines.len();
        Ok(Self {
            draft,
            header_errors: Vec::new(),
            line_errors: vec![LineErrors::default(); line_count],
            items,
            store,
            close_notice_delay: SAVE_NOTICE_DELAY,
        })
    }

    /// Override the post-save notice delay (tests set this to zero).
    pub fn with_close_notice_delay(mut self, delay: Duration) -> Self {
        self.close_notice_delay = delay;
        self
    }

    // ── Read access for the presentation layer ──────────────────────

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// Aggregate figures, recomputed from scratch on every call.
    pub fn totals(&self) -> Totals {
        self.draft.totals()
    }

    pub fn header_errors(&self) -> &[HeaderError] {
        &self.header_errors
    }

    pub fn line_errors(&self) -> &[LineErrors] {
        &self.line_errors
    }

    pub fn line_error(&self, index: usize) -> Option<&LineErrors> {
        self.line_errors.get(index)
    }

    // ── Row operations ──────────────────────────────────────────────

    /// Append a blank row; its row number is its position, count + 1.
    pub fn add_row(&mut self) {
        self.draft.push_blank_line();
        self.line_errors.push(LineErrors::default());
    }

    /// Remove the row at `index` and discard its error state.
    ///
    /// Lenient by design: the last row may be removed; submission-time
    /// validation rejects the empty draft.
    pub fn remove_row(&mut self, index: usize) {
        self.draft.remove_line(index);
        if index < self.line_errors.len() {
            self.line_errors.remove(index);
        }
    }

    /// Set a line field from raw user text, clearing that field's error
    /// and recomputing the row amount synchronously.
    pub fn change_field(&mut self, index: usize, field: LineField, raw: &str) {
        self.draft.set_line_field(index, field, raw);
        if let Some(errors) = self.line_errors.get_mut(index) {
            match field {
                LineField::Quantity => errors.quantity = None,
                LineField::Rate => errors.rate = None,
                LineField::DiscountPercent => errors.discount = None,
                LineField::Description => {}
            }
        }
    }

    // ── Header operations ───────────────────────────────────────────

    pub fn change_invoice_date(&mut self, date: Option<NaiveDate>) {
        self.draft.set_invoice_date(date);
        self.header_errors
            .retain(|e| *e != HeaderError::InvoiceDateRequired);
    }

    pub fn change_customer_name(&mut self, raw: &str) {
        self.draft.set_customer_name(raw);
        self.header_errors
            .retain(|e| *e != HeaderError::CustomerNameRequired);
    }

    pub fn change_city(&mut self, raw: &str) {
        self.draft.set_city(raw);
    }

    pub fn change_address(&mut self, raw: &str) {
        self.draft.set_address(raw);
    }

    pub fn change_notes(&mut self, raw: &str) {
        self.draft.set_notes(raw);
    }

    pub fn change_tax_percent(&mut self, raw: &str) {
        self.draft.set_tax_percent(raw);
    }

    // ── Item resolution ─────────────────────────────────────────────

    /// Record a new item selection on a row.
    ///
    /// The reference is applied immediately and the row's item error is
    /// cleared optimistically, independent of resolution success. The
    /// returned request (for `Some` selections) is the caller's handle
    /// for applying the eventual lookup result.
    pub fn begin_item_change(
        &mut self,
        index: usize,
        item: Option<ItemRef>,
    ) -> Option<ResolutionRequest> {
        let line = self.draft.lines.get_mut(index)?;
        line.item_ref = item;
        if let Some(errors) = self.line_errors.get_mut(index) {
            errors.item = None;
        }
        item.map(|item| ResolutionRequest { index, item })
    }

    /// Apply a completed lookup to the requesting row — unless the row
    /// has been removed or has moved on to a different item, in which
    /// case the stale result is discarded.
    pub fn apply_resolution(&mut self, request: ResolutionRequest, record: &ItemRecord) {
        match self.draft.lines.get_mut(request.index) {
            Some(line) if line.item_ref == Some(request.item) => {
                line.apply_resolution(&record.description, record.sales_rate, record.discount_pct);
            }
            _ => {
                tracing::debug!(
                    row = request.index,
                    item = %request.item,
                    "discarding stale item resolution"
                );
            }
        }
    }

    /// Select an item on a row and resolve it in one step.
    ///
    /// Lookup failures and unknown references are logged, never blocking:
    /// the selection sticks, the row stays partially unresolved.
    pub async fn change_item_reference(&mut self, index: usize, item: Option<ItemRef>) {
        let Some(request) = self.begin_item_change(index, item) else {
            return;
        };
        match self.items.resolve(request.item).await {
            Ok(Some(record)) => self.apply_resolution(request, &record),
            Ok(None) => {
                tracing::warn!(item = %request.item, "item not found in catalog");
            }
            Err(e) => {
                tracing::warn!(item = %request.item, "failed to fetch item details: {e}");
            }
        }
    }

    // ── Submission ──────────────────────────────────────────────────

    /// Validate and submit the draft.
    ///
    /// On validation failure the field-level errors are stored for
    /// rendering and nothing is sent. On acceptance the session waits
    /// the close-notice delay, then reports `Saved`; the caller closes
    /// and refreshes. On rejection the draft stays fully editable.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let report = validate(&self.draft);
        if !report.is_valid() {
            let message = report
                .summary_message()
                .unwrap_or_else(|| "Enter quantity".to_string());
            self.store_report(report);
            return SubmitOutcome::Invalid { message };
        }
        self.store_report(report);

        let Some(date) = self.draft.invoice_date else {
            return SubmitOutcome::Invalid {
                message: HeaderError::InvoiceDateRequired.to_string(),
            };
        };

        let payload = NewInvoice {
            invoice_no: self.draft.invoice_number,
            invoice_date: date.format("%Y-%m-%d").to_string(),
            customer_name: self.draft.customer_name.clone(),
            address: self.draft.address.clone(),
            city: self.draft.city.clone(),
            tax_percentage: self.draft.tax_percent.value(),
            notes: self.draft.notes.clone(),
            lines: self
                .draft
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| InvoiceLineDto {
                    row_no: Some(i as u32 + 1),
                    item_id: line.item_ref,
                    description: line.description.clone(),
                    quantity: line.quantity.value(),
                    rate: line.rate.value(),
                    discount_pct: line.discount_percent.value(),
                })
                .collect(),
        };

        let result = match self.draft.mode {
            DraftMode::Add => self.store.create(&payload).await.map(|created| {
                tracing::info!(invoice_id = %created.invoice_id, "invoice created");
                "Invoice added successfully!"
            }),
            DraftMode::Edit { invoice_id } => {
                let update = InvoiceUpdate {
                    invoice: payload,
                    invoice_id,
                    updated_on: self.draft.concurrency_token.clone(),
                };
                self.store.update(&update).await.map(|()| {
                    tracing::info!(invoice_id = %invoice_id, "invoice updated");
                    "Invoice updated successfully!"
                })
            }
        };

        match result {
            Ok(message) => {
                tokio::time::sleep(self.close_notice_delay).await;
                SubmitOutcome::Saved {
                    message: message.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!("invoice submission rejected: {e}");
                SubmitOutcome::Rejected {
                    message: e.user_message(),
                }
            }
        }
    }

    fn store_report(&mut self, report: ValidationReport) {
        // Report rows are index-aligned with the line sequence.
        self.header_errors = report.header;
        self.line_errors = report.lines;
    }
}

/// `max(existing numbers) + 1`, fallback 1 when none exist.
fn next_invoice_number(numbers: impl Iterator<Item = u32>) -> u32 {
    numbers.max().map_or(1, |max| max + 1)
}

/// Backend dates arrive as full timestamps; the draft keeps the
/// canonical `YYYY-MM-DD` prefix.
fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(raw, "unparsable invoice date from backend");
            None
        }
    }
}
