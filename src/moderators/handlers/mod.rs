//! HTTP handlers for the `/moderators` routes.

pub mod root;
pub mod by_id;
