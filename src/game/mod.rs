//! The game-facing API surface.
//!
//! Everything under `/game` is called by the game servers themselves, not by moderators. These
//! endpoints authenticate with an opaque API key (see [`crate::authentication::ApiKey`]) and are
//! all rate limited, since the game calls them on behalf of (potentially malicious) players.

use axum::routing::{get, post, put};
use axum::Router;

use crate::State;

pub mod models;
pub use models::{
	ActiveBan, AppealSubmission, BanStatus, PlayerSync, PlayerWarning, PlayerWarnings,
	PromoCodeInfo, RedeemRequest, RedeemedCode, SkipTimerRequest,
};

pub mod handlers;

/// Returns a router for the `/game` surface.
pub fn router(state: &'static State) -> Router {
	Router::new()
		.route("/bans/:roblox_id", get(handlers::bans::get))
		.route("/warnings/:roblox_id", get(handlers::warnings::get))
		.route("/players/:roblox_id", get(handlers::players::get))
		.route("/players", put(handlers::players::put))
		.route("/promo-codes", get(handlers::promo_codes::get))
		.route("/promo-codes/redeem", post(handlers::promo_codes::redeem))
		.route("/appeals", post(handlers::appeals::submit))
		.route("/appeals/skip-timer", post(handlers::appeals::skip_timer))
		.route("/group-bans", get(handlers::group_bans::get))
		.with_state(state)
}
