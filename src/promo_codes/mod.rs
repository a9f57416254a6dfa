//! Everything related to promo codes.
//!
//! Promo codes are redeemed in-game for a reward. Codes are stored uppercase and matched
//! case-insensitively, can be deactivated, and can carry a maximum number of uses; see
//! [`models::UNLIMITED_USES`] for how "unlimited" codes are represented.

use axum::http::Method;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{
	CreatedPromoCode, NewPromoCode, PromoCode, PromoCodeID, PromoCodeUpdate, UNLIMITED_USES,
};

pub mod handlers;

/// Returns a router for the `/promo-codes` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.route("/", post(handlers::root::post))
		.route_layer(cors::dashboard(Method::POST, &state.config))
		.with_state(state);

	let by_id = Router::new()
		.route("/:code_id", patch(handlers::by_id::patch))
		.route("/:code_id", delete(handlers::by_id::delete))
		.route_layer(cors::dashboard([Method::PATCH, Method::DELETE], &state.config))
		.with_state(state);

	root.merge(by_id)
}
