//! Invoice endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Invoice, InvoiceRepo, InvoiceSummary, InvoiceWithCompany};
use crate::http::error::ApiError;
use crate::http::extractors::{InvoiceId, JsonBody};
use crate::http::routes::DeletedResponse;
use crate::http::server::AppState;

/// Create invoice request
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: Option<String>,
    pub amt: Option<f64>,
}

/// Update invoice request. Only `amt` is applied; a `paid` field from
/// older clients is accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: Option<f64>,
}

/// Invoice row as stored
#[derive(Serialize)]
pub struct InvoiceResponse {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            comp_code: i.comp_code,
            amt: i.amt,
            paid: i.paid,
            add_date: i.add_date,
            paid_date: i.paid_date,
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceListItem {
    pub id: i32,
    pub comp_code: String,
}

impl From<InvoiceSummary> for InvoiceListItem {
    fn from(i: InvoiceSummary) -> Self {
        Self {
            id: i.id,
            comp_code: i.comp_code,
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceCompany {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Invoice with its company nested
#[derive(Serialize)]
pub struct InvoiceDetailResponse {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: InvoiceCompany,
}

impl From<InvoiceWithCompany> for InvoiceDetailResponse {
    fn from(i: InvoiceWithCompany) -> Self {
        Self {
            id: i.id,
            amt: i.amt,
            paid: i.paid,
            add_date: i.add_date,
            paid_date: i.paid_date,
            company: InvoiceCompany {
                code: i.company_code,
                name: i.company_name,
                description: i.company_description,
            },
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceEnvelope<T> {
    pub invoice: T,
}

#[derive(Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceListItem>,
}

/// GET /invoices - list all invoices
async fn list_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let invoices = InvoiceRepo::new(&state.pool).list().await?;

    Ok(Json(InvoiceListResponse {
        invoices: invoices.into_iter().map(InvoiceListItem::from).collect(),
    }))
}

/// GET /invoices/{id} - one invoice with its company
async fn get_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<InvoiceEnvelope<InvoiceDetailResponse>>, ApiError> {
    let invoice = InvoiceRepo::new(&state.pool).get(id).await?;

    Ok(Json(InvoiceEnvelope {
        invoice: InvoiceDetailResponse::from(invoice),
    }))
}

/// POST /invoices - create an unpaid invoice
async fn create_invoice(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceEnvelope<InvoiceResponse>>), ApiError> {
    let invoice = InvoiceRepo::new(&state.pool)
        .create(req.comp_code.as_deref(), req.amt)
        .await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");

    Ok((
        StatusCode::CREATED,
        Json(InvoiceEnvelope {
            invoice: InvoiceResponse::from(invoice),
        }),
    ))
}

/// PUT /invoices/{id} - change the amount
async fn update_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
    JsonBody(req): JsonBody<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceEnvelope<InvoiceResponse>>, ApiError> {
    let invoice = InvoiceRepo::new(&state.pool)
        .update_amount(id, req.amt)
        .await?;

    Ok(Json(InvoiceEnvelope {
        invoice: InvoiceResponse::from(invoice),
    }))
}

/// DELETE /invoices/{id}
async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<DeletedResponse>, ApiError> {
    InvoiceRepo::new(&state.pool).delete(id).await?;
    tracing::info!(id, "invoice deleted");
    Ok(Json(DeletedResponse::new()))
}

/// Invoice routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}
