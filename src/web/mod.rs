//! HTTP layer: routes and HTML rendering.

pub mod render;
pub mod routes;

pub use routes::{AppState, report_routes};
