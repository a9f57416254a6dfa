//! Handlers for the `/players/{player}` route.

use axum::extract::Path;
use axum::Json;
use sqlx::QueryBuilder;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::openapi::responses;
use crate::players::{queries, Player, PlayerIdentifier, PlayerUpdate};
use crate::sqlx::UpdateQuery;
use crate::state::AppState;
use crate::{Error, Result};

/// Fetch a specific player by their Roblox ID or username.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/players/{player}",
  tag = "Players",
  security(("Moderator Key" = [])),
  params(("player" = PlayerIdentifier, Path, description = "a player's Roblox ID or username")),
  responses(
    responses::Ok<Player>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
    responses::BadGateway,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: Moderator,
	Path(identifier): Path<PlayerIdentifier>,
) -> Result<Json<Player>> {
	let roblox_id = identifier.resolve_id(state).await?;

	let mut query = QueryBuilder::new(queries::SELECT);

	query.push(" WHERE p.id = ").push_bind(roblox_id);

	let player = query
		.build_query_as::<Player>()
		.fetch_optional(&state.database)
		.await?
		.ok_or_else(|| Error::not_found("player"))?;

	Ok(Json(player))
}

/// Update a specific player's game data.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  patch,
  path = "/players/{player}",
  tag = "Players",
  security(("Moderator Key" = ["players"])),
  params(("player" = PlayerIdentifier, Path, description = "a player's Roblox ID or username")),
  request_body = PlayerUpdate,
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn patch(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::PLAYERS.value() }>,
	Path(identifier): Path<PlayerIdentifier>,
	Json(update): Json<PlayerUpdate>,
) -> Result<responses::NoContent> {
	if update.is_empty() {
		return Err(Error::no_content());
	}

	let roblox_id = identifier.resolve_id(state).await?;
	let mut query = UpdateQuery::new("Players");

	if let Some(coins) = update.coins {
		query.set(" coins ", coins);
	}

	if let Some(gems) = update.gems {
		query.set(" gems ", gems);
	}

	if let Some(level) = update.level {
		query.set(" level ", level);
	}

	if let Some(playtime_seconds) = update.playtime_seconds {
		query.set(" playtime_seconds ", playtime_seconds);
	}

	query.push(" WHERE id = ").push_bind(roblox_id);

	let result = query.build().execute(&state.database).await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("player"));
	}

	tracing::info! {
		target: "rbx_mod_api::audit_log",
		%roblox_id,
		moderator.id = %moderator.id,
		?update,
		"updated player data",
	};

	Ok(responses::NoContent)
}
