//! HTTP handlers for the `/warnings` routes.

pub mod root;
pub mod by_id;
