//! Handlers for the `/promo-codes` route.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use tracing::trace;
use utoipa::IntoParams;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::openapi::parameters::{Limit, Offset};
use crate::openapi::responses;
use crate::openapi::responses::{Created, PaginationResponse};
use crate::promo_codes::{
	queries, CreatedPromoCode, NewPromoCode, PromoCode, PromoCodeID, UNLIMITED_USES,
};
use crate::sqlx::{query, FilteredQuery, QueryBuilderExt, SqlErrorExt};
use crate::state::AppState;
use crate::{Error, Result};

/// Query parameters for `GET /promo-codes`.
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

/// Fetch promo codes.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/promo-codes",
  tag = "Promo Codes",
  security(("Moderator Key" = [])),
  params(GetParams),
  responses(
    responses::Ok<PaginationResponse<PromoCode>>,
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
) -> Result<Json<PaginationResponse<PromoCode>>> {
	let mut query = FilteredQuery::new(queries::SELECT);

	if let Some(is_active) = is_active {
		query.filter(" c.is_active = ", is_active);
	}

	query.push(" ORDER BY c.created_on DESC ");
	query.push_limits(limit, offset);

	let mut transaction = state.transaction().await?;

	let codes = query
		.build_query_as::<PromoCode>()
		.fetch_all(transaction.as_mut())
		.await?;

	let total = query::total_rows(&mut transaction).await?;

	transaction.commit().await?;

	if codes.is_empty() {
		return Err(Error::no_content());
	}

	Ok(Json(PaginationResponse {
		total,
		results: codes,
	}))
}

/// Create a new promo code.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/promo-codes",
  tag = "Promo Codes",
  security(("Moderator Key" = ["codes"])),
  request_body = NewPromoCode,
  responses(
    responses::Created<CreatedPromoCode>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::Conflict,
    responses::InternalServerError,
  ),
)]
pub async fn post(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::CODES.value() }>,
	Json(NewPromoCode {
		code,
		reward,
		max_uses,
	}): Json<NewPromoCode>,
) -> Result<Created<Json<CreatedPromoCode>>> {
	let code = code.trim().to_uppercase();

	if code.is_empty() {
		return Err(Error::invalid("promo code"));
	}

	let max_uses = max_uses.unwrap_or(UNLIMITED_USES);

	let code_id: PromoCodeID = sqlx::query(
		"INSERT INTO PromoCodes (code, reward, max_uses, created_by) VALUES (?, ?, ?, ?)",
	)
	.bind(&code)
	.bind(&reward)
	.bind(max_uses)
	.bind(moderator.id)
	.execute(&state.database)
	.await
	.map_err(|err| {
		if err.is_duplicate_entry() {
			Error::already_exists("promo code").context(err)
		} else {
			Error::from(err)
		}
	})?
	.last_insert_id()
	.into();

	trace!(%code_id, %code, moderator.id = %moderator.id, "created promo code");

	Ok(Created(Json(CreatedPromoCode { code_id })))
}
