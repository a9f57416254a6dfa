//! Everything related to ban appeals.
//!
//! Banned players submit appeals in-game (see [`crate::game::handlers::appeals`]) once their
//! ban's appeal window has opened. Moderators review them on the dashboard; approving an appeal
//! also reverts the ban.

use axum::http::Method;
use axum::routing::{get, patch};
use axum::Router;

use crate::middleware::cors;
use crate::State;

mod queries;

pub mod models;
pub use models::{Appeal, AppealID, AppealReview, AppealStatus, CreatedAppeal};

pub mod handlers;

/// Returns a router for the `/appeals` resource.
pub fn router(state: &'static State) -> Router {
	let root = Router::new()
		.route("/", get(handlers::root::get))
		.route_layer(cors::permissive())
		.with_state(state);

	let by_id = Router::new()
		.route("/:appeal_id", get(handlers::by_id::get))
		.route_layer(cors::permissive())
		.route("/:appeal_id", patch(handlers::by_id::patch))
		.route_layer(cors::dashboard(Method::PATCH, &state.config))
		.with_state(state);

	root.merge(by_id)
}
