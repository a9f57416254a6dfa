//! Handlers for the `/promo-codes/{code_id}` route.

use axum::extract::Path;
use axum::Json;
use tracing::trace;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::openapi::responses;
use crate::promo_codes::{PromoCodeID, PromoCodeUpdate};
use crate::sqlx::UpdateQuery;
use crate::state::AppState;
use crate::{Error, Result};

/// Update a specific promo code.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  patch,
  path = "/promo-codes/{code_id}",
  tag = "Promo Codes",
  security(("Moderator Key" = ["codes"])),
  params(("code_id" = u64, Path, description = "a promo code's ID")),
  request_body = PromoCodeUpdate,
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
	moderator: Moderator<{ Permissions::CODES.value() }>,
	Path(code_id): Path<PromoCodeID>,
	Json(PromoCodeUpdate {
		reward,
		max_uses,
		is_active,
	}): Json<PromoCodeUpdate>,
) -> Result<responses::NoContent> {
	if reward.is_none() && max_uses.is_none() && is_active.is_none() {
		return Err(Error::no_content());
	}

	let mut query = UpdateQuery::new("PromoCodes");

	if let Some(ref reward) = reward {
		query.set(" reward ", reward);
	}

	if let Some(max_uses) = max_uses {
		query.set(" max_uses ", max_uses);
	}

	if let Some(is_active) = is_active {
		query.set(" is_active ", is_active);
	}

	query.push(" WHERE id = ").push_bind(code_id);

	let result = query.build().execute(&state.database).await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("promo code"));
	}

	trace!(%code_id, moderator.id = %moderator.id, "updated promo code");

	Ok(responses::NoContent)
}

/// Delete a specific promo code.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  delete,
  path = "/promo-codes/{code_id}",
  tag = "Promo Codes",
  security(("Moderator Key" = ["codes"])),
  params(("code_id" = u64, Path, description = "a promo code's ID")),
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn delete(
	AppState(state): AppState,
	moderator: Moderator<{ Permissions::CODES.value() }>,
	Path(code_id): Path<PromoCodeID>,
) -> Result<responses::NoContent> {
	let result = sqlx::query("DELETE FROM PromoCodes WHERE id = ?")
		.bind(code_id)
		.execute(&state.database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("promo code"));
	}

	trace!(%code_id, moderator.id = %moderator.id, "deleted promo code");

	Ok(responses::NoContent)
}
