//! Handlers for the `/game/players` routes.

use axum::extract::Path;
use axum::Json;
use tracing::trace;

use crate::authentication::ApiKey;
use crate::game::PlayerSync;
use crate::openapi::responses;
use crate::openapi::responses::NoContent;
use crate::players::Player;
use crate::ratelimit::Quota;
use crate::roblox::RobloxID;
use crate::state::AppState;
use crate::{Error, Result};

/// Rate limit for player fetches.
const GET_QUOTA: Quota = Quota::per_minute(30);

/// Rate limit for player syncs.
const SYNC_QUOTA: Quota = Quota::per_minute(10);

/// Fetch a player's stored stats.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/game/players/{roblox_id}",
  tag = "Game",
  security(("Game Server Key" = [])),
  params(("roblox_id" = u64, Path, description = "a player's Roblox ID")),
  responses(
    responses::Ok<Player>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	key: ApiKey,
	Path(roblox_id): Path<RobloxID>,
) -> Result<Json<Player>> {
	state.limiter.acquire("get_player", roblox_id, GET_QUOTA)?;

	let player = sqlx::query_as(
		r"
		SELECT
		  p.id,
		  p.username,
		  p.coins,
		  p.gems,
		  p.level,
		  p.playtime_seconds,
		  p.first_seen,
		  p.last_seen
		FROM
		  Players p
		WHERE
		  p.id = ?
		",
	)
	.bind(roblox_id)
	.fetch_optional(&state.database)
	.await?
	.ok_or_else(|| Error::not_found("player"))?;

	Ok(Json(player))
}

/// Upsert a player's stats snapshot.
///
/// The game sends the full snapshot every time; we don't do partial updates here.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  put,
  path = "/game/players",
  tag = "Game",
  security(("Game Server Key" = [])),
  request_body = PlayerSync,
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn put(
	AppState(state): AppState,
	key: ApiKey,
	Json(sync): Json<PlayerSync>,
) -> Result<NoContent> {
	state
		.limiter
		.acquire("sync_player", sync.roblox_id, SYNC_QUOTA)?;

	sqlx::query(
		r"
		INSERT INTO
		  Players (id, username, coins, gems, level, playtime_seconds)
		VALUES
		  (?, ?, ?, ?, ?, ?)
		ON DUPLICATE KEY
		UPDATE
		  username = VALUES(username),
		  coins = VALUES(coins),
		  gems = VALUES(gems),
		  level = VALUES(level),
		  playtime_seconds = VALUES(playtime_seconds),
		  last_seen = NOW()
		",
	)
	.bind(sync.roblox_id)
	.bind(&sync.username)
	.bind(sync.coins)
	.bind(sync.gems)
	.bind(sync.level)
	.bind(sync.playtime_seconds)
	.execute(&state.database)
	.await?;

	trace!(roblox_id = %sync.roblox_id, "synced player snapshot");

	Ok(NoContent)
}
