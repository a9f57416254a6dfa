//! Handlers for the `/game/group-bans` routes.

use axum::Json;

use crate::authentication::ApiKey;
use crate::group_bans::GroupBan;
use crate::openapi::responses;
use crate::ratelimit::{Quota, Subject};
use crate::state::AppState;
use crate::Result;

/// Rate limit for group ban fetches. Global, since the response is identical for everyone.
const QUOTA: Quota = Quota::per_minute(30);

/// List the currently active group bans.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/game/group-bans",
  tag = "Game",
  security(("Game Server Key" = [])),
  responses(
    responses::Ok<GroupBan>,
    responses::Unauthorized,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn get(AppState(state): AppState, key: ApiKey) -> Result<Json<Vec<GroupBan>>> {
	state
		.limiter
		.acquire("list_group_bans", Subject::Global, QUOTA)?;

	let group_bans = sqlx::query_as(
		r"
		SELECT
		  gb.id,
		  gb.group_id,
		  gb.group_name,
		  gb.reason,
		  gb.is_active,
		  m.id banned_by_id,
		  m.name banned_by_name,
		  gb.created_on
		FROM
		  GroupBans gb
		  LEFT JOIN Moderators m ON m.id = gb.banned_by
		WHERE
		  gb.is_active
		ORDER BY
		  gb.created_on DESC
		",
	)
	.fetch_all(&state.database)
	.await?;

	Ok(Json(group_bans))
}
