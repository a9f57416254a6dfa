//! HTTP handlers for the `/appeals` routes.

pub mod root;
pub mod by_id;
