//! Everything related to warnings.
//!
//! Warnings are lightweight moderation actions: they don't prevent the player from joining, but
//! are shown to them in-game and logged to Discord.

use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{CreatedWarning, NewWarning, Warning, WarningID};

pub mod handlers;

/// Returns a router for the `/warnings` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.route("/", post(handlers::root::post))
		.route_layer(cors::dashboard(Method::POST, &state.config))
		.with_state(state);

	let by_id = Router::new()
		.route("/:warning_id", delete(handlers::by_id::delete))
		.route_layer(cors::dashboard(Method::DELETE, &state.config))
		.with_state(state);

	root.merge(by_id)
}
