//! HTTP handlers for the `/bans` routes.

pub mod root;
pub mod by_id;
