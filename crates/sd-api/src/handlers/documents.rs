//! Generated documents
//!
//! Each endpoint assembles a [`DocumentData`] from the relevant
//! entities and streams the rendered PDF with its deterministic file
//! name. Rendering is all-or-nothing: any failure surfaces a single
//! "failed to generate" error.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use sd_billing::PaymentSummary;
use sd_db::{
    BankRepository, ClientRepository, ClientRow, EstimateItemRow, EstimateRepository, EstimateRow,
    PaymentRepository, PaymentRow, Repository,
};
use sd_documents::{
    document_file_name, render, whatsapp_share_link, BankInfo, CompanyInfo, DocumentData,
    DocumentKind, LineRow, PartyInfo, PaymentRowData, TotalsBlock,
};
use sd_models::{PaymentPhase, PaymentStatus};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    /// "estimate" (default) or "invoice"
    pub kind: Option<String>,
    /// Bank account for the payment instructions block
    pub bank_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareLinkResponse {
    link: String,
}

fn company_info(state: &AppState) -> CompanyInfo {
    let company = &state.config.company;

    // A missing or unreadable logo only drops the image block.
    let logo_png = company.logo_path.as_ref().and_then(|path| {
        std::fs::read(path)
            .map_err(|e| {
                tracing::debug!("Logo not readable at {}: {}", path, e);
                e
            })
            .ok()
    });

    CompanyInfo {
        name: company.name.clone(),
        address: company.address.clone(),
        phone: company.phone.clone(),
        email: company.email.clone(),
        logo_png,
    }
}

fn party_info(client: &ClientRow) -> PartyInfo {
    PartyInfo {
        name: client.name.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        city: client.city.clone(),
    }
}

fn line_rows(items: &[EstimateItemRow]) -> Vec<LineRow> {
    items
        .iter()
        .map(|item| {
            let measure = if item.measurement_type == "area" {
                format!(
                    "{} x {} cm",
                    item.length_cm.unwrap_or(0.0),
                    item.breadth_cm.unwrap_or(0.0)
                )
            } else {
                format!("{} pcs", item.quantity.unwrap_or(0.0))
            };
            LineRow {
                name: item.name.clone(),
                measure,
                unit_price: item.unit_price,
                total: item.line_total,
            }
        })
        .collect()
}

fn payment_rows(rows: &[PaymentRow]) -> Vec<PaymentRowData> {
    rows.iter()
        .map(|row| PaymentRowData {
            phase: row.phase,
            amount: row.amount,
            status: row.status.clone(),
            paid_on: row.paid_on,
        })
        .collect()
}

fn row_to_phase(row: &PaymentRow) -> PaymentPhase {
    PaymentPhase {
        id: Some(row.id),
        client_id: row.client_id,
        estimate_id: row.estimate_id,
        phase: row.phase,
        amount: row.amount,
        status: PaymentStatus::parse(&row.status).unwrap_or_default(),
        paid_on: row.paid_on,
        recorded_by: row.recorded_by,
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    }
}

async fn bank_info(state: &AppState, bank_id: Option<i64>) -> ApiResult<Option<BankInfo>> {
    let pool = state.pool()?;
    let repo = BankRepository::new(pool.clone());

    let row = match bank_id {
        Some(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from_repo(e, "Bank"))?,
        // Without an explicit selection the first account is used.
        None => repo
            .find_all(1, 0)
            .await
            .map_err(|e| ApiError::from_repo(e, "Bank"))?
            .into_iter()
            .next(),
    };

    Ok(row.map(|bank| BankInfo {
        bank_name: bank.bank_name,
        account_name: bank.account_name,
        account_number: bank.account_number,
        ifsc: bank.ifsc,
        upi_id: bank.upi_id,
    }))
}

fn pdf_response(bytes: Vec<u8>, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn load_estimate_bundle(
    state: &AppState,
    estimate_id: i64,
) -> ApiResult<(EstimateRow, Vec<EstimateItemRow>, ClientRow, Vec<PaymentRow>)> {
    let pool = state.pool()?;
    let estimates = EstimateRepository::new(pool.clone());

    let estimate = estimates
        .find_by_id(estimate_id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Estimate"))?
        .ok_or_else(|| ApiError::not_found("Estimate", estimate_id))?;

    let clients = ClientRepository::new(pool.clone());
    let payments = PaymentRepository::new(pool.clone());

    // Items, client, and schedule are unrelated resources; fetch them
    // together and wait for all three.
    let (items, client, schedule) = tokio::try_join!(
        estimates.items(estimate_id),
        clients.find_by_id(estimate.client_id),
        payments.find_by_client(estimate.client_id),
    )
    .map_err(|e| ApiError::from_repo(e, "Estimate"))?;

    let client = client.ok_or_else(|| ApiError::not_found("Client", estimate.client_id))?;

    Ok((estimate, items, client, schedule))
}

/// GET /api/estimates/:id/document?kind=estimate|invoice&bankId=
pub async fn estimate_document(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Query(query): Query<DocumentQuery>,
) -> ApiResult<Response> {
    let kind = match query.kind.as_deref() {
        None | Some("estimate") => DocumentKind::Estimate,
        Some("invoice") => DocumentKind::Invoice,
        Some(other) => {
            return Err(ApiError::bad_request(format!(
                "Unknown document kind: {}",
                other
            )))
        }
    };

    let (estimate, items, client, schedule) = load_estimate_bundle(&state, id).await?;

    let phases: Vec<PaymentPhase> = schedule.iter().map(row_to_phase).collect();
    let summary = PaymentSummary::compute(estimate.grand_total, &phases);

    let bank = if kind == DocumentKind::Invoice {
        bank_info(&state, query.bank_id).await?
    } else {
        None
    };

    let data = DocumentData {
        kind,
        company: company_info(&state),
        client: party_info(&client),
        date: Utc::now().date_naive(),
        lines: line_rows(&items),
        totals: TotalsBlock {
            subtotal: estimate.subtotal,
            discount: estimate.discount,
            grand_total: estimate.grand_total,
        },
        payments: payment_rows(&schedule),
        amount_received: summary.total_received,
        balance: summary.remaining_balance,
        bank,
        notes: vec![],
    };

    let bytes = render(&data).map_err(|e| {
        tracing::error!("Document generation failed: {}", e);
        ApiError::internal("Failed to generate document")
    })?;

    let filename = document_file_name(&client.name, kind);
    Ok(pdf_response(bytes, &filename))
}

/// GET /api/client-payments/:id/receipt
pub async fn payment_receipt(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let pool = state.pool()?;
    let payments = PaymentRepository::new(pool.clone());

    let payment = payments
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Payment"))?
        .ok_or_else(|| ApiError::not_found("Payment", id))?;

    if payment.status != "paid" {
        return Err(ApiError::bad_request("Receipts are only issued for paid phases"));
    }

    let (estimate, _items, client, schedule) =
        load_estimate_bundle(&state, payment.estimate_id).await?;

    let phases: Vec<PaymentPhase> = schedule.iter().map(row_to_phase).collect();
    let summary = PaymentSummary::compute(estimate.grand_total, &phases);

    let kind = DocumentKind::Receipt {
        phase: payment.phase,
    };
    let data = DocumentData {
        kind,
        company: company_info(&state),
        client: party_info(&client),
        date: payment.paid_on.unwrap_or_else(|| Utc::now().date_naive()),
        lines: vec![],
        totals: TotalsBlock {
            subtotal: estimate.subtotal,
            discount: estimate.discount,
            grand_total: estimate.grand_total,
        },
        payments: payment_rows(&schedule),
        amount_received: summary.total_received,
        balance: summary.remaining_balance,
        bank: bank_info(&state, None).await?,
        notes: vec![],
    };

    let bytes = render(&data).map_err(|e| {
        tracing::error!("Document generation failed: {}", e);
        ApiError::internal("Failed to generate document")
    })?;

    let filename = document_file_name(&client.name, kind);
    Ok(pdf_response(bytes, &filename))
}

/// GET /api/clients/:id/payment-report
pub async fn payment_report(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let pool = state.pool()?;
    let clients = ClientRepository::new(pool.clone());
    let estimates = EstimateRepository::new(pool.clone());
    let payments = PaymentRepository::new(pool.clone());

    let (client, approved, schedule) = tokio::try_join!(
        clients.find_by_id(id),
        estimates.find_approved_for_client(id),
        payments.find_by_client(id),
    )
    .map_err(|e| ApiError::from_repo(e, "Client"))?;

    let client = client.ok_or_else(|| ApiError::not_found("Client", id))?;
    let approved =
        approved.ok_or_else(|| ApiError::bad_request("Client has no approved estimate"))?;

    let phases: Vec<PaymentPhase> = schedule.iter().map(row_to_phase).collect();
    let summary = PaymentSummary::compute(approved.grand_total, &phases);

    let data = DocumentData {
        kind: DocumentKind::PaymentReport,
        company: company_info(&state),
        client: party_info(&client),
        date: Utc::now().date_naive(),
        lines: vec![],
        totals: TotalsBlock {
            subtotal: approved.subtotal,
            discount: approved.discount,
            grand_total: approved.grand_total,
        },
        payments: payment_rows(&schedule),
        amount_received: summary.total_received,
        balance: summary.remaining_balance,
        bank: None,
        notes: vec![],
    };

    let bytes = render(&data).map_err(|e| {
        tracing::error!("Document generation failed: {}", e);
        ApiError::internal("Failed to generate document")
    })?;

    let filename = document_file_name(&client.name, DocumentKind::PaymentReport);
    Ok(pdf_response(bytes, &filename))
}

/// GET /api/estimates/:id/share-link
///
/// WhatsApp deep link with a templated text summary; no attachment.
pub async fn estimate_share_link(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let (estimate, items, client, _schedule) = load_estimate_bundle(&state, id).await?;

    let message = format!(
        "Hello {}, your estimate from {} is ready: {} materials, total Rs. {}. Thank you!",
        client.name,
        state.config.company.name,
        items.len(),
        estimate.grand_total,
    );

    Ok(Json(ShareLinkResponse {
        link: whatsapp_share_link(&client.phone, &message),
    }))
}
