//! HTTP server: router and request handlers

pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::build_router;
