//! Everything related to group bans.
//!
//! Group bans blacklist entire Roblox groups: the game kicks members of banned groups on join.
//! Deleting a group ban only deactivates it, so the history stays auditable.

use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{CreatedGroupBan, GroupBan, GroupBanID, NewGroupBan};

pub mod handlers;

/// Returns a router for the `/group-bans` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.route("/", post(handlers::root::post))
		.route_layer(cors::dashboard(Method::POST, &state.config))
		.with_state(state);

	let by_id = Router::new()
		.route("/:group_ban_id", delete(handlers::by_id::delete))
		.route_layer(cors::dashboard(Method::DELETE, &state.config))
		.with_state(state);

	root.merge(by_id)
}
