use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use toolshelf_catalog::query;
use toolshelf_core::{CatalogError, Tool, ToolPatch};

use crate::error::{AppError, Result};
use crate::extract::{AdminSession, ApiJson, ApiQuery};
use crate::model::{
    DataResponse, IdQuery, LimitQuery, ListQuery, MutationResponse, Pagination, ToolListResponse,
};
use crate::state::AppState;

pub async fn list_tools_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Response> {
    let tools = state.catalog().list().await?;

    if let Some(id) = params.id.as_deref() {
        let tool = query::by_id(&tools, id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        return Ok(Json(DataResponse { data: tool }).into_response());
    }

    let mut matched: Vec<&Tool> = tools.iter().collect();
    if let Some(platform) = params.platform.as_deref() {
        matched = query::filter_by_platform_or_category(matched, platform);
    }
    if let Some(category) = params.category.as_deref() {
        matched = query::filter_by_platform_or_category(matched, category);
    }
    let terms = params.tag_terms();
    if !terms.is_empty() {
        matched = query::filter_by_tags(matched, terms.as_slice());
    }
    if let Some(text) = params.search.as_deref() {
        matched = query::search(matched, text);
    }

    let body = match params.page {
        Some(page) => {
            let page = query::paginate(&matched, page, params.per_page.unwrap_or_default());
            let pagination = Pagination::from(&page);
            ToolListResponse {
                data: page.items,
                pagination: Some(pagination),
            }
        }
        None => ToolListResponse {
            data: matched,
            pagination: None,
        },
    };

    Ok(Json(body).into_response())
}

pub async fn popular_tools_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitQuery>,
) -> Result<Json<DataResponse<Vec<Tool>>>> {
    let tools = state.catalog().list().await?;
    let limit = params.limit.unwrap_or(state.config().popular_limit);
    let data = query::popular(&tools, limit).into_iter().cloned().collect();
    Ok(Json(DataResponse { data }))
}

pub async fn platform_counts_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<BTreeMap<String, usize>>>> {
    let tools = state.catalog().list().await?;
    Ok(Json(DataResponse {
        data: query::platform_counts(&tools),
    }))
}

pub async fn related_tools_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<LimitQuery>,
) -> Result<Json<DataResponse<Vec<Tool>>>> {
    let tools = state.catalog().list().await?;
    if query::by_id(&tools, &id).is_none() {
        return Err(CatalogError::NotFound(id).into());
    }

    let limit = params.limit.unwrap_or(state.config().related_limit);
    let data = query::related(&tools, &id, limit)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse { data }))
}

pub async fn random_tools_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<LimitQuery>,
) -> Result<Json<DataResponse<Vec<Tool>>>> {
    let tools = state.catalog().list().await?;
    if query::by_id(&tools, &id).is_none() {
        return Err(CatalogError::NotFound(id).into());
    }

    let limit = params.limit.unwrap_or(state.config().related_limit);
    let data = query::random(&tools, &id, limit, &mut rand::thread_rng())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse { data }))
}

pub async fn create_tool_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiJson(input): ApiJson<ToolPatch>,
) -> Result<Json<MutationResponse<Tool>>> {
    let tool = state.catalog().create(input).await?;
    Ok(Json(MutationResponse::ok("tool created", Some(tool))))
}

pub async fn update_tool_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiJson(patch): ApiJson<ToolPatch>,
) -> Result<Json<MutationResponse<Tool>>> {
    let id = patch
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing tool id".to_string()))?;

    let tool = state.catalog().update(&id, patch).await?;
    Ok(Json(MutationResponse::ok("tool updated", Some(tool))))
}

pub async fn delete_tool_handler(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiQuery(params): ApiQuery<IdQuery>,
) -> Result<Json<MutationResponse<()>>> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing tool id".to_string()))?;

    state.catalog().delete(&id).await?;
    Ok(Json(MutationResponse::ok("tool deleted", None)))
}
