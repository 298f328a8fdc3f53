pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod summary_response;
pub mod upload;

pub use app_state::AppState;
pub use config::AppConfig;
pub use router::create_router;
