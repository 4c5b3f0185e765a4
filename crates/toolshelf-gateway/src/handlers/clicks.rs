use axum::extract::State;
use axum::Json;
use toolshelf_core::{CatalogError, ClickOutcome};

use crate::error::{AppError, Result};
use crate::extract::ApiQuery;
use crate::model::{ClickResponse, IdQuery};
use crate::state::AppState;

/// Records a click. Only a missing or unknown id is reported as a failure;
/// every other problem is answered with a successful body.
pub async fn record_click_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<IdQuery>,
) -> Result<Json<ClickResponse>> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing tool id".to_string()))?;

    let response = match state.clicks().record_click(&id).await {
        Ok(outcome) => click_response(outcome),
        Err(CatalogError::NotFound(id)) => return Err(CatalogError::NotFound(id).into()),
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "click could not be processed");
            ClickResponse {
                success: true,
                message: "click received but not recorded".to_string(),
                saved: Some(false),
                ..ClickResponse::default()
            }
        }
    };

    Ok(Json(response))
}

fn click_response(outcome: ClickOutcome) -> ClickResponse {
    match outcome {
        ClickOutcome::Recorded { clicks } => ClickResponse {
            success: true,
            message: "click recorded".to_string(),
            clicks: Some(clicks),
            ..ClickResponse::default()
        },
        ClickOutcome::Deduplicated => ClickResponse {
            success: true,
            message: "click already recorded, duplicate ignored".to_string(),
            is_repeated: Some(true),
            ..ClickResponse::default()
        },
        ClickOutcome::InProgress => ClickResponse {
            success: true,
            message: "click is being processed".to_string(),
            is_processing: Some(true),
            ..ClickResponse::default()
        },
        ClickOutcome::Unsaved { clicks, .. } => ClickResponse {
            success: true,
            message: "click recorded but not saved".to_string(),
            clicks: Some(clicks),
            saved: Some(false),
            ..ClickResponse::default()
        },
    }
}
