//! Handlers for the `/moderators` route.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::authentication;
use crate::moderators::{queries, Moderator};
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::PaginationResponse;
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /moderators`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct GetParams {
	/// Limit the number of returned results.
	#[serde(default)]
	limit: Limit,

	/// Paginate by `offset` entries.
	#[serde(default)]
	offset: Offset,
}

/// Fetch moderators.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/moderators",
  tag = "Moderators",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<Moderator>>,
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: authentication::Moderator,
	Query(GetParams { limit, offset }): Query<GetParams>,
) -> Result<Json<PaginationResponse<Moderator>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	query.push(" ORDER BY m.id ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let moderators = query
		.build_query_as::<Moderator>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if moderators.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: moderators,
	}))
}
