//! Handlers for the `/warnings` route.

use axum::extract::Query;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::trace;
use utoipa::IntoParams;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::discord::{LogKind, ModLog};
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::{Created, PaginationResponse};
use crate::players::PlayerIdentifier;
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt};
use crate::state::AppState;
use crate::warnings::{queries, CreatedWarning, NewWarning, Warning, WarningID};
use crate::{Error, Result};

/// Query parameters for `GET /warnings`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Filter by player.
	player: Option<PlayerIdentifier>,

	/// Filter by creation date.
	created_after: Option<DateTime<Utc>>,

	/// Filter by creation date.
	created_before: Option<DateTime<Utc>>,

	/// Limit the number of returned results.
	#[serde(default)]
	limit: Limit,

	/// Paginate by `offset` entries.
	#[serde(default)]
	offset: Offset,
}

/// Fetch warnings.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/warnings",
  tag = "Warnings",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<Warning>>,
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: Moderator,
	Query(GetParams {
		player,
		created_after,
		created_before,
		limit,
		offset,
	}): Query<GetParams>,
) -> Result<Json<PaginationResponse<Warning>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	if let Some(ref player) = player {
		let roblox_id = player.resolve_id(state).await?;

		query.filter(" w.player_id = ", roblox_id);
	}

	if let Some(created_after) = created_after {
		query.filter(" w.created_on > ", created_after);
	}

	if let Some(created_before) = created_before {
		query.filter(" w.created_on < ", created_before);
	}

	query.push(" ORDER BY w.created_on DESC ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let warnings = query
		.build_query_as::<Warning>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if warnings.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: warnings,
	}))
}

/// Warn a player.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/warnings",
  tag = "Warnings",
  security(("Moderator Key" = ["warnings"])),
  request_body = NewWarning,
  responses(
    responses::Created<CreatedWarning>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
    responses::BadGateway,
  ),
)]
pub async fn post(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::WARNINGS.value() }>,
	Json(NewWarning {
		player,
		reason,
		notes,
	}): Json<NewWarning>,
) -> Result<Created<Json<CreatedWarning>>> {
	let player = player.resolve_info(state).await?;
	let mut transaction = state.transaction().await?;

	sqlx::query(
		r"
		INSERT INTO
		  Players (id, username)
		VALUES
		  (?, ?)
		ON DUPLICATE KEY UPDATE
		  username = VALUES(username)
		",
	)
	.bind(player.id)
	.bind(&player.username)
	.execute(transaction.as_mut())
	.await?;

	let warning_id: WarningID = sqlx::query(
		"INSERT INTO Warnings (player_id, reason, notes, warned_by) VALUES (?, ?, ?, ?)",
	)
	.bind(player.id)
	.bind(&reason)
	.bind(&notes)
	.bind(moderator.id)
	.execute(transaction.as_mut())
	.await?
	.last_insert_id()
	.into();

	transaction.commit().await?;

	trace!(%warning_id, player.id = %player.id, %reason, "issued warning");

	ModLog {
		kind: LogKind::Warning,
		roblox_id: player.id,
		username: &player.username,
		reason: &reason,
		notes: notes.as_deref(),
		moderator_name: &moderator.name,
	}
	.dispatch(state);

	Ok(Created(Json(CreatedWarning { warning_id })))
}
