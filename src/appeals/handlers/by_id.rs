//! Handlers for the `/appeals/{appeal_id}` route.

use axum::extract::Path;
use axum::Json;
use sqlx::{QueryBuilder, Row};
use tracing::trace;

use crate::appeals::{queries, Appeal, AppealID, AppealReview, AppealStatus};
use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::bans::BanID;
use crate::discord::{LogKind, ModLog};
use crate::openapi::responses;
use crate::roblox::RobloxID;
use crate::state::AppState;
use crate::{Error, Result};

/// Fetch a specific appeal by its ID.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/appeals/{appeal_id}",
  tag = "Appeals",
  security(("Moderator Key" = [])),
  params(("appeal_id" = u64, Path, description = "an appeal's ID")),
  responses(
    responses::Ok<Appeal>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: Moderator,
	Path(appeal_id): Path<AppealID>,
) -> Result<Json<Appeal>> {
	let mut query = QueryBuilder::new(queries::SELECT);

	query.push(" WHERE a.id = ").push_bind(appeal_id);

	let appeal = query
		.build_query_as::<Appeal>()
		.fetch_optional(&state.database)
		.await?
		.ok_or_else(|| Error::not_found("appeal"))?;

	Ok(Json(appeal))
}

/// Review a specific appeal.
///
/// Only pending appeals can be reviewed, and each appeal only once. Approving an appeal also
/// reverts the ban it was submitted for.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  patch,
  path = "/appeals/{appeal_id}",
  tag = "Appeals",
  security(("Moderator Key" = ["bans"])),
  params(("appeal_id" = u64, Path, description = "an appeal's ID")),
  request_body = AppealReview,
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::Conflict,
    responses::InternalServerError,
  ),
)]
pub async fn patch(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Path(appeal_id): Path<AppealID>,
	Json(AppealReview { status }): Json<AppealReview>,
) -> Result<responses::NoContent> {
	if status == AppealStatus::Pending {
		return Err(Error::invalid("appeal review status"));
	}

	let mut transaction = state.transaction().await?;

	let appeal = sqlx::query(
		r"
		SELECT
		  a.ban_id,
		  a.status,
		  a.player_id,
		  p.username
		FROM
		  BanAppeals a
		  JOIN Players p ON p.id = a.player_id
		WHERE
		  a.id = ?
		FOR UPDATE
		",
	)
	.bind(appeal_id)
	.fetch_optional(transaction.as_mut())
	.await?
	.ok_or_else(|| Error::not_found("appeal"))?;

	if appeal.try_get::<AppealStatus, _>("status")? != AppealStatus::Pending {
		return Err(Error::already_exists("review"));
	}

	let ban_id = appeal.try_get::<BanID, _>("ban_id")?;
	let player_id = appeal.try_get::<RobloxID, _>("player_id")?;
	let username = appeal.try_get::<String, _>("username")?;

	sqlx::query(
		"UPDATE BanAppeals SET status = ?, reviewed_by = ?, reviewed_on = NOW() WHERE id = ?",
	)
	.bind(status)
	.bind(moderator.id)
	.bind(appeal_id)
	.execute(transaction.as_mut())
	.await?;

	if status == AppealStatus::Approved {
		let already_unbanned =
			sqlx::query_scalar::<_, u64>("SELECT id FROM Unbans WHERE ban_id = ?")
				.bind(ban_id)
				.fetch_optional(transaction.as_mut())
				.await?
				.is_some();

		if !already_unbanned {
			sqlx::query(
				"INSERT INTO Unbans (ban_id, reason, unbanned_by) VALUES (?, 'Appeal approved', ?)",
			)
			.bind(ban_id)
			.bind(moderator.id)
			.execute(transaction.as_mut())
			.await?;
		}

		sqlx::query("UPDATE Bans SET is_active = FALSE WHERE id = ?")
			.bind(ban_id)
			.execute(transaction.as_mut())
			.await?;
	}

	transaction.commit().await?;

	trace!(%appeal_id, %ban_id, ?status, moderator.id = %moderator.id, "reviewed appeal");

	if status == AppealStatus::Approved {
		ModLog {
			kind: LogKind::Unban,
			roblox_id: player_id,
			username: &username,
			reason: "Appeal approved",
			notes: None,
			moderator_name: &moderator.name,
		}
		.dispatch(state);
	}

	Ok(responses::NoContent)
}
