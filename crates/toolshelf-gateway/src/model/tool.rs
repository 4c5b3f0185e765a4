use serde::{Deserialize, Serialize};
use toolshelf_catalog::Page;
use toolshelf_core::Tool;

/// Query string of `GET /api/tools`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub id: Option<String>,
    pub platform: Option<String>,
    pub category: Option<String>,
    /// Comma-separated tag terms.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListQuery {
    pub fn tag_terms(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl From<&Page<'_>> for Pagination {
    fn from(page: &Page<'_>) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolListResponse<'a> {
    pub data: Vec<&'a Tool>,
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MutationResponse<T> {
    pub fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Body of `POST /api/tools/clicks`. Exactly one of the optional fields
/// describes what happened.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_repeated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_processing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}
