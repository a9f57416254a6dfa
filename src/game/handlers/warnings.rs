//! Handlers for the `/game/warnings` routes.

use axum::extract::Path;
use axum::Json;
use sqlx::Row;

use crate::authentication::ApiKey;
use crate::game::{PlayerWarning, PlayerWarnings};
use crate::openapi::responses;
use crate::ratelimit::Quota;
use crate::roblox::RobloxID;
use crate::state::AppState;
use crate::Result;

/// Rate limit for warning fetches.
const QUOTA: Quota = Quota::per_minute(20);

/// Fetch a player's warnings, newest first.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/game/warnings/{roblox_id}",
  tag = "Game",
  security(("Game Server Key" = [])),
  params(("roblox_id" = u64, Path, description = "a player's Roblox ID")),
  responses(
    responses::Ok<PlayerWarnings>,
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
) -> Result<Json<PlayerWarnings>> {
	state.limiter.acquire("get_warnings", roblox_id, QUOTA)?;

	let warnings = sqlx::query(
		r"
		SELECT
		  id,
		  reason,
		  created_on
		FROM
		  Warnings
		WHERE
		  player_id = ?
		ORDER BY
		  created_on DESC
		",
	)
	.bind(roblox_id)
	.fetch_all(&state.database)
	.await?
	.into_iter()
	.map(|row| {
		Ok(PlayerWarning {
			id: row.try_get("id")?,
			reason: row.try_get("reason")?,
			created_on: row.try_get("created_on")?,
		})
	})
	.collect::<sqlx::Result<Vec<_>>>()?;

	Ok(Json(PlayerWarnings {
		count: warnings.len() as u64,
		warnings,
	}))
}
