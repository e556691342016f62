//! HTTP API: routing, request validation and error translation for the
//! product catalog.

pub mod app;
pub mod middleware;
