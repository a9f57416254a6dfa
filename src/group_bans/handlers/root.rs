//! Handlers for the `/group-bans` route.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use tracing::trace;
use utoipa::IntoParams;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::group_bans::{queries, CreatedGroupBan, GroupBan, GroupBanID, NewGroupBan};
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::{Created, PaginationResponse};
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /group-bans`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Filter by active status.
	is_active: Option<bool>,

	/// Limit the number of returned results.
	#[serde(default)]
	limit: Limit,

	/// Paginate by `offset` entries.
	#[serde(default)]
	offset: Offset,
}

/// Fetch group bans.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/group-bans",
  tag = "Group Bans",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<GroupBan>>,
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
		is_active,
		limit,
		offset,
	}): Query<GetParams>,
) -> Result<Json<PaginationResponse<GroupBan>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	if let Some(is_active) = is_active {
		query.filter(" g.is_active = ", is_active);
	}

	query.push(" ORDER BY g.created_on DESC ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let group_bans = query
		.build_query_as::<GroupBan>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if group_bans.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: group_bans,
	}))
}

/// Ban a Roblox group.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/group-bans",
  tag = "Group Bans",
  security(("Moderator Key" = ["bans"])),
  request_body = NewGroupBan,
  responses(
    responses::Created<CreatedGroupBan>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::Conflict,
    responses::InternalServerError,
  ),
)]
pub async fn post(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Json(NewGroupBan {
		group_id,
		group_name,
		reason,
	}): Json<NewGroupBan>,
) -> Result<Created<Json<CreatedGroupBan>>> {
	let already_banned = sqlx::query_scalar::<_, u64>(
		"SELECT id FROM GroupBans WHERE group_id = ? AND is_active",
	)
	.bind(group_id)
	.fetch_optional(&state.database)
	.await?
	.is_some();

	if already_banned {
		return Err(Error::already_exists("group ban"));
	}

	let group_ban_id: GroupBanID = sqlx::query(
		"INSERT INTO GroupBans (group_id, group_name, reason, banned_by) VALUES (?, ?, ?, ?)",
	)
	.bind(group_id)
	.bind(&group_name)
	.bind(&reason)
	.bind(moderator.id)
	.execute(&state.database)
	.await?
	.last_insert_id()
	.into();

	trace!(%group_ban_id, %group_id, moderator.id = %moderator.id, "created group ban");

	Ok(Created(Json(CreatedGroupBan { group_ban_id })))
}
