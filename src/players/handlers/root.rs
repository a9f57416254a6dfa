//! Handlers for the `/players` route.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::authentication::Moderator;
use crate::openapi::parameters::{Limit, Offset, SortingOrder};
use crate::openapi::responses;
use crate::openapi::responses::PaginationResponse;
use crate::players::{queries, Player};
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /players`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Filter by username (partial match).
	username: Option<String>,

	/// Limit the number of returned results.
	#[serde(default)]
	limit: Limit,

	/// Paginate by `offset` entries.
	#[serde(default)]
	offset: Offset,
}

/// Fetch players.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/players",
  tag = "Players",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<Player>>,
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
		username,
		limit,
		offset,
	}): Query<GetParams>,
) -> Result<Json<PaginationResponse<Player>>> {
	let mut query = FilteredQuery::new(queries::SELECT);
	let mut transaction = state.transaction().await?;

	if let Some(username) = username {
		query.filter(" p.username LIKE ", format!("%{username}%"));
	}

	query.order_by(SortingOrder::Descending, " p.last_seen ");
	query.push_limits(limit, offset);

	let players = query
		.build_query_as::<Player>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if players.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: players,
	}))
}
