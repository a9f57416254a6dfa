//! Handlers for the `/bans/{ban_id}` route.

use axum::extract::Path;
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Row};
use tracing::trace;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::bans::{queries, Ban, BanID, BanUpdate, CreatedUnban, NewUnban, UnbanID};
use crate::discord::{LogKind, ModLog};
use crate::openapi::responses;
use crate::openapi::responses::Created;
use crate::roblox::RobloxID;
use crate::sqlx::UpdateQuery;
use crate::state::AppState;
use crate::{Error, Result};

/// Fetch a specific ban by its ID.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/bans/{ban_id}",
  tag = "Bans",
  security(("Moderator Key" = [])),
  params(("ban_id" = u64, Path, description = "a ban's ID")),
  responses(
    responses::Ok<Ban>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: Moderator,
	Path(ban_id): Path<BanID>,
) -> Result<Json<Ban>> {
	let mut query = QueryBuilder::new(queries::SELECT);

	query.push(" WHERE b.id = ").push_bind(ban_id);

	let ban = query
		.build_query_as::<Ban>()
		.fetch_optional(&state.database)
		.await?
		.ok_or_else(|| Error::not_found("ban"))?;

	Ok(Json(ban))
}

/// Update a specific ban.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  patch,
  path = "/bans/{ban_id}",
  tag = "Bans",
  security(("Moderator Key" = ["bans"])),
  params(("ban_id" = u64, Path, description = "a ban's ID")),
  request_body = BanUpdate,
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
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Path(ban_id): Path<BanID>,
	Json(BanUpdate {
		reason,
		notes,
		expires_on,
	}): Json<BanUpdate>,
) -> Result<responses::NoContent> {
	if reason.is_none() && notes.is_none() && expires_on.is_none() {
		return Err(Error::no_content());
	}

	let mut query = UpdateQuery::new("Bans");

	if let Some(ref reason) = reason {
		query.set(" reason ", reason);
	}

	if let Some(ref notes) = notes {
		query.set(" notes ", notes.as_deref());
	}

	if let Some(expires_on) = expires_on {
		query.set(" expires_on ", expires_on);
	}

	query.push(" WHERE id = ").push_bind(ban_id);

	let result = query.build().execute(&state.database).await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("ban"));
	}

	trace!(%ban_id, moderator.id = %moderator.id, "updated ban");

	Ok(responses::NoContent)
}

/// Revert a specific ban.
///
/// This creates an "unban" entry and deactivates the ban. Any given ban can only be reverted
/// once.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  delete,
  path = "/bans/{ban_id}",
  tag = "Bans",
  security(("Moderator Key" = ["bans"])),
  params(("ban_id" = u64, Path, description = "a ban's ID")),
  request_body = NewUnban,
  responses(
    responses::Created<CreatedUnban>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::Conflict,
    responses::InternalServerError,
  ),
)]
pub async fn delete(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Path(ban_id): Path<BanID>,
	Json(NewUnban { reason }): Json<NewUnban>,
) -> Result<Created<Json<CreatedUnban>>> {
	let mut transaction = state.transaction().await?;

	let ban = sqlx::query(
		r"
		SELECT
		  b.player_id,
		  p.username,
		  ub.id unban_id
		FROM
		  Bans b
		  JOIN Players p ON p.id = b.player_id
		  LEFT JOIN Unbans ub ON ub.ban_id = b.id
		WHERE
		  b.id = ?
		",
	)
	.bind(ban_id)
	.fetch_optional(transaction.as_mut())
	.await?
	.ok_or_else(|| Error::not_found("ban"))?;

	if let Some(unban_id) = ban.try_get::<Option<UnbanID>, _>("unban_id")? {
		return Err(Error::ban_already_reverted(ban_id, unban_id));
	}

	let player_id = ban.try_get::<RobloxID, _>("player_id")?;
	let username = ban.try_get::<String, _>("username")?;

	let unban_id: UnbanID = sqlx::query(
		"INSERT INTO Unbans (ban_id, reason, unbanned_by) VALUES (?, ?, ?)",
	)
	.bind(ban_id)
	.bind(&reason)
	.bind(moderator.id)
	.execute(transaction.as_mut())
	.await?
	.last_insert_id()
	.into();

	sqlx::query("UPDATE Bans SET is_active = FALSE WHERE id = ?")
		.bind(ban_id)
		.execute(transaction.as_mut())
		.await?;

	transaction.commit().await?;

	trace!(%ban_id, %unban_id, moderator.id = %moderator.id, "reverted ban");

	ModLog {
		kind: LogKind::Unban,
		roblox_id: player_id,
		username: &username,
		reason: &reason,
		notes: None,
		moderator_name: &moderator.name,
	}
	.dispatch(state);

	Ok(Created(Json(CreatedUnban { unban_id })))
}
