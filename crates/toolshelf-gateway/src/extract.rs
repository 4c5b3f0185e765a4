use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_COOKIE: &str = "isAdminLoggedIn";

/// Proof that the caller may change the catalog.
///
/// Always granted while the admin gate is disabled. With the gate enabled
/// the request must carry `isAdminLoggedIn=true`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.config().admin_gate || has_admin_cookie(parts) {
            return Ok(AdminSession);
        }

        tracing::debug!(path = %parts.uri.path(), "rejected request without admin session");
        Err(AppError::Unauthorized("admin login required".to_string()))
    }
}

/// `Json` whose rejection is reported in the API error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query` whose rejection is reported in the API error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = axum::extract::rejection::QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

fn has_admin_cookie(parts: &Parts) -> bool {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == ADMIN_COOKIE && value == "true")
}
