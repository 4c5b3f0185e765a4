//! HTTP surface of the tool catalog.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use config::GatewayConfig;
pub use error::AppError;
pub use state::AppState;
