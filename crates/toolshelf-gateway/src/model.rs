mod health;
mod tool;

pub use health::HealthResponse;
pub use tool::{
    ClickResponse, DataResponse, IdQuery, LimitQuery, ListQuery, MutationResponse, Pagination,
    ToolListResponse,
};
