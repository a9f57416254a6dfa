//! HTTP handlers for the `/group-bans` routes.

pub mod root;
pub mod by_id;
