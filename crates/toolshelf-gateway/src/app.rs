use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_tool_handler, delete_tool_handler, health_handler, list_tools_handler,
    platform_counts_handler, popular_tools_handler, random_tools_handler, record_click_handler,
    related_tools_handler, update_tool_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/api/tools",
                get(list_tools_handler)
                    .post(create_tool_handler)
                    .put(update_tool_handler)
                    .delete(delete_tool_handler),
            )
            .route("/api/tools/popular", get(popular_tools_handler))
            .route("/api/tools/platforms", get(platform_counts_handler))
            .route("/api/tools/clicks", post(record_click_handler))
            .route("/api/tools/{id}/related", get(related_tools_handler))
            .route("/api/tools/{id}/random", get(random_tools_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
