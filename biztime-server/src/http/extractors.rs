//! Custom Axum extractors
//!
//! Both reject with `ApiError`, so malformed input gets the same JSON
//! error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate an invoice id from path
pub struct InvoiceId(pub i32);

impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::InvalidInvoiceId(rejection.body_text()))?;

        let id = id
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidInvoiceId(id.clone()))?;

        Ok(Self(id))
    }
}

/// JSON body whose decode failures become `ValidationError::MalformedBody`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::from(ValidationError::MalformedBody(rejection.body_text()))
        })?;

        Ok(Self(value))
    }
}
