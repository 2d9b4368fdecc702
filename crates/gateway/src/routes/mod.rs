//! HTTP route handlers.

pub mod orders;
