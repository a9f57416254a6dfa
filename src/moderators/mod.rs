//! Everything related to moderators.
//!
//! Moderators are the people using the dashboard. Their access keys live in the `Credentials`
//! table (see [`crate::authentication`]); this module covers the moderators themselves and their
//! [`Permissions`].
//!
//! [`Permissions`]: crate::authorization::Permissions

use axum::http::Method;
use axum::routing::{get, put};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{Moderator, ModeratorID, ModeratorInfo, ModeratorUpdate};

pub mod handlers;

/// Returns a router for the `/moderators` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.with_state(state);

	let by_id = Router::new()
		.route("/:moderator_id", get(handlers::by_id::get))
		.route_layer(cors::permissive())
		.route("/:moderator_id", put(handlers::by_id::put))
		.route_layer(cors::dashboard(Method::PUT, &state.config))
		.with_state(state);

	root.merge(by_id)
}
