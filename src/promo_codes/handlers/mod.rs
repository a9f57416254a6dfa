//! HTTP handlers for the `/promo-codes` routes.

pub mod root;
pub mod by_id;
