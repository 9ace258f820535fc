//! Company endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Company, CompanyDetail, CompanyRepo, CompanySummary};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::DeletedResponse;
use crate::http::server::AppState;
use crate::models::{CompanyCode, ValidationError};

/// Create company request. `code` is derived from `name` when omitted.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Update company request. Both fields are replaced; omitted means NULL.
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct CompanyResponse {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            code: c.code,
            name: c.name,
            description: c.description,
        }
    }
}

#[derive(Serialize)]
pub struct CompanyListItem {
    pub code: String,
    pub name: String,
}

impl From<CompanySummary> for CompanyListItem {
    fn from(c: CompanySummary) -> Self {
        Self {
            code: c.code,
            name: c.name,
        }
    }
}

#[derive(Serialize)]
pub struct InvoiceRef {
    pub id: i32,
}

#[derive(Serialize)]
pub struct IndustryRef {
    pub code: String,
}

/// Company with nested invoice and industry references
#[derive(Serialize)]
pub struct CompanyDetailResponse {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<InvoiceRef>,
    pub industries: Vec<IndustryRef>,
}

impl From<CompanyDetail> for CompanyDetailResponse {
    fn from(d: CompanyDetail) -> Self {
        Self {
            code: d.company.code,
            name: d.company.name,
            description: d.company.description,
            invoices: d.invoice_ids.into_iter().map(|id| InvoiceRef { id }).collect(),
            industries: d
                .industry_codes
                .into_iter()
                .map(|code| IndustryRef { code })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct CompanyEnvelope<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyListItem>,
}

/// GET /companies - list all companies
async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let companies = CompanyRepo::new(&state.pool).list().await?;

    Ok(Json(CompanyListResponse {
        companies: companies.into_iter().map(CompanyListItem::from).collect(),
    }))
}

/// GET /companies/{code} - one company with its invoices and industries
async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CompanyEnvelope<CompanyDetailResponse>>, ApiError> {
    let detail = CompanyRepo::new(&state.pool).get(&code).await?;

    Ok(Json(CompanyEnvelope {
        company: CompanyDetailResponse::from(detail),
    }))
}

/// POST /companies - create a company
async fn create_company(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyEnvelope<CompanyResponse>>), ApiError> {
    let code = match (req.code.as_deref(), req.name.as_deref()) {
        (Some(code), _) => CompanyCode::new(code)?,
        (None, Some(name)) => CompanyCode::from_name(name)?,
        (None, None) => return Err(ValidationError::MissingName.into()),
    };

    let company = CompanyRepo::new(&state.pool)
        .create(code, req.name.as_deref(), req.description.as_deref())
        .await?;
    tracing::info!(code = %company.code, "company created");

    Ok((
        StatusCode::CREATED,
        Json(CompanyEnvelope {
            company: CompanyResponse::from(company),
        }),
    ))
}

/// PUT /companies/{code} - replace name and description
async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    JsonBody(req): JsonBody<UpdateCompanyRequest>,
) -> Result<Json<CompanyEnvelope<CompanyResponse>>, ApiError> {
    let company = CompanyRepo::new(&state.pool)
        .update(&code, req.name.as_deref(), req.description.as_deref())
        .await?;

    Ok(Json(CompanyEnvelope {
        company: CompanyResponse::from(company),
    }))
}

/// DELETE /companies/{code}
async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    CompanyRepo::new(&state.pool).delete(&code).await?;
    tracing::info!(%code, "company deleted");
    Ok(Json(DeletedResponse::new()))
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{code}",
            get(get_company).put(update_company).delete(delete_company),
        )
}
