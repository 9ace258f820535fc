//! Industry endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{CompanyIndustry, Industry, IndustryDetail, IndustryRepo};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::routes::DeletedResponse;
use crate::http::server::AppState;

/// Create industry request
#[derive(Debug, Deserialize)]
pub struct CreateIndustryRequest {
    pub code: Option<String>,
    pub industry: Option<String>,
}

#[derive(Serialize)]
pub struct IndustryResponse {
    pub code: String,
    pub industry: String,
}

impl From<Industry> for IndustryResponse {
    fn from(i: Industry) -> Self {
        Self {
            code: i.code,
            industry: i.industry,
        }
    }
}

#[derive(Serialize)]
pub struct IndustryCompany {
    pub code: String,
    pub name: String,
}

/// Industry with linked companies, returned unwrapped
#[derive(Serialize)]
pub struct IndustryDetailResponse {
    pub code: String,
    pub industry: String,
    pub companies: Vec<IndustryCompany>,
}

impl From<IndustryDetail> for IndustryDetailResponse {
    fn from(d: IndustryDetail) -> Self {
        Self {
            code: d.industry.code,
            industry: d.industry.industry,
            companies: d
                .companies
                .into_iter()
                .map(|c| IndustryCompany {
                    code: c.code,
                    name: c.name,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct IndustryListResponse {
    pub industries: Vec<IndustryResponse>,
}

#[derive(Serialize)]
pub struct IndustryEnvelope {
    pub industry: IndustryResponse,
}

#[derive(Serialize)]
pub struct CompIndResponse {
    pub comp_code: String,
    pub ind_code: String,
}

impl From<CompanyIndustry> for CompIndResponse {
    fn from(link: CompanyIndustry) -> Self {
        Self {
            comp_code: link.comp_code,
            ind_code: link.ind_code,
        }
    }
}

#[derive(Serialize)]
pub struct CompIndEnvelope {
    pub comp_ind: CompIndResponse,
}

/// GET /industries - list all industries
async fn list_industries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndustryListResponse>, ApiError> {
    let industries = IndustryRepo::new(&state.pool).list().await?;

    Ok(Json(IndustryListResponse {
        industries: industries.into_iter().map(IndustryResponse::from).collect(),
    }))
}

/// GET /industries/{code} - one industry with its companies
async fn get_industry(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<IndustryDetailResponse>, ApiError> {
    let detail = IndustryRepo::new(&state.pool).get(&code).await?;
    Ok(Json(IndustryDetailResponse::from(detail)))
}

/// POST /industries - create an industry
async fn create_industry(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateIndustryRequest>,
) -> Result<(StatusCode, Json<IndustryEnvelope>), ApiError> {
    let industry = IndustryRepo::new(&state.pool)
        .create(req.code.as_deref(), req.industry.as_deref())
        .await?;
    tracing::info!(code = %industry.code, "industry created");

    Ok((
        StatusCode::CREATED,
        Json(IndustryEnvelope {
            industry: IndustryResponse::from(industry),
        }),
    ))
}

/// POST /industries/{code}/add/{comp_code} - link a company to an industry
async fn add_company(
    State(state): State<Arc<AppState>>,
    Path((ind_code, comp_code)): Path<(String, String)>,
) -> Result<(StatusCode, Json<CompIndEnvelope>), ApiError> {
    let link = IndustryRepo::new(&state.pool)
        .associate(&ind_code, &comp_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CompIndEnvelope {
            comp_ind: CompIndResponse::from(link),
        }),
    ))
}

/// DELETE /industries/{code}
async fn delete_industry(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    IndustryRepo::new(&state.pool).delete(&code).await?;
    tracing::info!(%code, "industry deleted");
    Ok(Json(DeletedResponse::new()))
}

/// Industry routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/industries", get(list_industries).post(create_industry))
        .route(
            "/industries/{code}",
            get(get_industry).delete(delete_industry),
        )
        .route("/industries/{code}/add/{comp_code}", post(add_company))
}
