//! HTTP API Module
//! Routes for GTM generation, consent simulation, policy files and analytics

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
