pub mod analytics;
pub mod app;
pub mod chart;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod signup;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_state, resolve_data_path};
