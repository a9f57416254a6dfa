//! Everything related to bans.
//!
//! Bans carry an `is_active` flag, an optional expiration date, and an `appealable_on` timestamp
//! marking when the banned player may submit an appeal. Reverted bans get a matching row in the
//! `Unbans` table; each ban can only ever be reverted once.

use axum::http::Method;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{
	Ban, BanDuration, BanID, BanUpdate, CreatedBan, CreatedUnban, NewBan, NewUnban, Unban, UnbanID,
};

pub mod handlers;

/// Returns a router for the `/bans` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.route("/", post(handlers::root::post))
		.route_layer(cors::dashboard(Method::POST, &state.config))
		.with_state(state);

	let by_id = Router::new()
		.route("/:ban_id", get(handlers::by_id::get))
		.route_layer(cors::permissive())
		.route("/:ban_id", patch(handlers::by_id::patch))
		.route("/:ban_id", delete(handlers::by_id::delete))
		.route_layer(cors::dashboard([Method::PATCH, Method::DELETE], &state.config))
		.with_state(state);

	root.merge(by_id)
}
