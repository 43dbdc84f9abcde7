//! # channel-api
//!
//! REST API server built with Axum framework. Thin adapter: handlers parse
//! path and query input, delegate to the service layer, and shape errors
//! into the common body format.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
