pub mod app;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod load;
pub mod metrics;
pub mod models;
pub mod sample;
pub mod source;
pub mod state;
pub mod ui;

pub use app::router;
pub use source::resolve_data_source;
pub use state::AppState;
