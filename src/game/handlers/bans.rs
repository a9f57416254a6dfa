//! Handlers for the `/game/bans` routes.

use axum::extract::Path;
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::debug;

use crate::authentication::ApiKey;
use crate::bans::BanID;
use crate::game::{ActiveBan, BanStatus};
use crate::openapi::responses;
use crate::ratelimit::Quota;
use crate::roblox::RobloxID;
use crate::state::AppState;
use crate::Result;

/// Rate limit for ban checks.
const QUOTA: Quota = Quota::per_minute(30);

/// Check whether a player is currently banned.
///
/// The game calls this on every join. Bans whose expiration date has passed are deactivated
/// lazily, right here; there is no background job for it.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/game/bans/{roblox_id}",
  tag = "Game",
  security(("Game Server Key" = [])),
  params(("roblox_id" = u64, Path, description = "a player's Roblox ID")),
  responses(
    responses::Ok<BanStatus>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	key: ApiKey,
	Path(roblox_id): Path<RobloxID>,
) -> Result<Json<BanStatus>> {
	state.limiter.acquire("check_ban", roblox_id, QUOTA)?;

	let Some(ban) = sqlx::query(
		r"
		SELECT
		  id,
		  reason,
		  expires_on,
		  appealable_on
		FROM
		  Bans
		WHERE
		  player_id = ?
		  AND is_active
		ORDER BY
		  created_on DESC
		LIMIT
		  1
		",
	)
	.bind(roblox_id)
	.fetch_optional(&state.database)
	.await?
	else {
		return Ok(Json(BanStatus::not_banned()));
	};

	let ban_id = ban.try_get::<BanID, _>("id")?;
	let expires_on = ban.try_get::<Option<DateTime<Utc>>, _>("expires_on")?;
	let now = Utc::now();

	if ActiveBan::is_expired(expires_on, now) {
		sqlx::query("UPDATE Bans SET is_active = FALSE WHERE id = ?")
			.bind(ban_id)
			.execute(&state.database)
			.await?;

		debug!(%ban_id, %roblox_id, "deactivated expired ban");

		return Ok(Json(BanStatus::not_banned()));
	}

	Ok(Json(BanStatus::banned(ActiveBan::evaluate(
		ban_id,
		ban.try_get("reason")?,
		expires_on,
		ban.try_get("appealable_on")?,
		now,
	))))
}
