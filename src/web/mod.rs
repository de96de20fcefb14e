//! Web server module
//!
//! JSON HTTP API over the search executor.

mod handlers;
mod routes;
mod state;

pub use handlers::ApiError;
pub use routes::create_router;
pub use state::AppState;
