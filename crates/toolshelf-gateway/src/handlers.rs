mod clicks;
mod health;
mod tools;

pub use clicks::record_click_handler;
pub use health::health_handler;
pub use tools::{
    create_tool_handler, delete_tool_handler, list_tools_handler, platform_counts_handler,
    popular_tools_handler, random_tools_handler, related_tools_handler, update_tool_handler,
};
