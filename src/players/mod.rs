//! Everything related to players.
//!
//! Players are created implicitly: game servers sync them via `PUT /game/players`, and bans for
//! players we have never seen before insert a minimal row. There is no "create player" endpoint
//! on the dashboard surface.

use axum::http::Method;
use axum::routing::{get, patch};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{Player, PlayerIdentifier, PlayerInfo, PlayerUpdate};

pub mod handlers;

/// Returns a router for the `/players` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.with_state(state);

	let by_identifier = Router::new()
		.route("/:player", get(handlers::by_identifier::get))
		.route_layer(cors::permissive())
		.route("/:player", patch(handlers::by_identifier::patch))
		.route_layer(cors::dashboard(Method::PATCH, &state.config))
		.with_state(state);

	root.merge(by_identifier)
}
