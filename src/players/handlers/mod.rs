//! HTTP handlers for the `/players` routes.

pub mod root;
pub mod by_identifier;
