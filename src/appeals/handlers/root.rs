//! Handlers for the `/appeals` route.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::appeals::{queries, Appeal, AppealStatus};
use crate::authentication::Moderator;
use crate::bans::BanID;
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::PaginationResponse;
use crate::players::PlayerIdentifier;
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /appeals`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Filter by review status.
	status: Option<AppealStatus>,

	/// Filter by ban.
	ban_id: Option<BanID>,

	/// Filter by player.
	player: Option<PlayerIdentifier>,

	/// Limit the number of returned results.
	#[serde(default)]
	limit: Limit,

	/// Paginate by `offset` entries.
	#[serde(default)]
	offset: Offset,
}

/// Fetch ban appeals.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/appeals",
  tag = "Appeals",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<Appeal>>,
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
		status,
		ban_id,
		player,
		limit,
		offset,
	}): Query<GetParams>,
) -> Result<Json<PaginationResponse<Appeal>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	if let Some(status) = status {
		query.filter(" a.status = ", status);
	}

	if let Some(ban_id) = ban_id {
		query.filter(" a.ban_id = ", ban_id);
	}

	if let Some(ref player) = player {
		let roblox_id = player.resolve_id(state).await?;

		query.filter(" a.player_id = ", roblox_id);
	}

	query.push(" ORDER BY a.created_on DESC ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let appeals = query
		.build_query_as::<Appeal>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if appeals.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: appeals,
	}))
}
