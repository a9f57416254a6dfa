//! Handlers for the `/bans` route.

use axum::extract::Query;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::trace;
use utoipa::IntoParams;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::bans::models::APPEAL_DELAY_DAYS;
use crate::bans::{queries, Ban, BanID, CreatedBan, NewBan};
use crate::discord::{LogKind, ModLog};
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::{Created, PaginationResponse};
use crate::players::PlayerIdentifier;
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt, SqlErrorExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /bans`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Filter by player.
	player: Option<PlayerIdentifier>,

	/// Filter by bans that are currently in effect.
	is_active: Option<bool>,

	/// Filter by bans that have been reverted.
	unbanned: Option<bool>,

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

/// Fetch bans.
///
/// These include bans that have expired or have been reverted. If that's the case, they will also
/// include the according "unban" entry.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/bans",
  tag = "Bans",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<Ban>>,
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
		is_active,
		unbanned,
		created_after,
		created_before,
		limit,
		offset,
	}): Query<GetParams>,
) -> Result<Json<PaginationResponse<Ban>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	if let Some(ref player) = player {
		let roblox_id = player.resolve_id(state).await?;

		query.filter(" b.player_id = ", roblox_id);
	}

	if let Some(is_active) = is_active {
		query.filter(" b.is_active = ", is_active);
	}

	if let Some(unbanned) = unbanned {
		query.filter_is_null(" ub.id ", !unbanned);
	}

	if let Some(created_after) = created_after {
		query.filter(" b.created_on > ", created_after);
	}

	if let Some(created_before) = created_before {
		query.filter(" b.created_on < ", created_before);
	}

	query.push(" ORDER BY b.created_on DESC ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let bans = query
		.build_query_as::<Ban>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if bans.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: bans,
	}))
}

/// Ban a player.
///
/// If we have never seen the player before, they are resolved through the Roblox Users API and a
/// minimal player row is created for them.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/bans",
  tag = "Bans",
  security(("Moderator Key" = ["bans"])),
  request_body = NewBan,
  responses(
    responses::Created<CreatedBan>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::Conflict,
    responses::InternalServerError,
    responses::BadGateway,
  ),
)]
pub async fn post(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Json(NewBan {
		player,
		reason,
		notes,
		duration,
	}): Json<NewBan>,
) -> Result<Created<Json<CreatedBan>>> {
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

	let already_banned = sqlx::query_scalar::<_, BanID>(
		"SELECT id FROM Bans WHERE player_id = ? AND is_active",
	)
	.bind(player.id)
	.fetch_optional(transaction.as_mut())
	.await?
	.is_some();

	if already_banned {
		return Err(Error::already_exists("ban"));
	}

	let now = Utc::now();
	let expires_on = duration.map(|duration| now + duration.duration());
	let appealable_on = now + Duration::days(APPEAL_DELAY_DAYS);

	let ban_id: BanID = sqlx::query(
		r"
		INSERT INTO
		  Bans (player_id, reason, notes, banned_by, expires_on, appealable_on)
		VALUES
		  (?, ?, ?, ?, ?, ?)
		",
	)
	.bind(player.id)
	.bind(&reason)
	.bind(&notes)
	.bind(moderator.id)
	.bind(expires_on)
	.bind(appealable_on)
	.execute(transaction.as_mut())
	.await
	.map_err(|err| {
		if err.is_fk_violation_of("banned_by") {
			Error::not_found("moderator").context(err)
		} else {
			Error::from(err)
		}
	})?
	.last_insert_id()
	.into();

	transaction.commit().await?;

	trace!(%ban_id, player.id = %player.id, %reason, "created ban");

	ModLog {
		kind: LogKind::Ban {
			duration: duration.map(|duration| duration.as_str().to_owned()),
		},
		roblox_id: player.id,
		username: &player.username,
		reason: &reason,
		notes: notes.as_deref(),
		moderator_name: &moderator.name,
	}
	.dispatch(state);

	Ok(Created(Json(CreatedBan { ban_id })))
}
