//! Handlers for the `/game/promo-codes` routes.

use axum::Json;
use sqlx::Row;
use tracing::info;

use crate::authentication::ApiKey;
use crate::game::{PromoCodeInfo, RedeemRequest, RedeemedCode};
use crate::openapi::responses;
use crate::promo_codes::models::{has_uses_left, UNLIMITED_USES};
use crate::promo_codes::PromoCodeID;
use crate::ratelimit::{Quota, Subject};
use crate::state::AppState;
use crate::{Error, Result};

/// Rate limit for listing active codes. Global, since the response is identical for everyone.
const LIST_QUOTA: Quota = Quota::per_minute(30);

/// Rate limit for redemptions.
const REDEEM_QUOTA: Quota = Quota::per_minute(10);

/// List the currently active promo codes.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/game/promo-codes",
  tag = "Game",
  security(("Game Server Key" = [])),
  responses(
    responses::Ok<PromoCodeInfo>,
    responses::Unauthorized,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn get(AppState(state): AppState, key: ApiKey) -> Result<Json<Vec<PromoCodeInfo>>> {
	state
		.limiter
		.acquire("list_promo_codes", Subject::Global, LIST_QUOTA)?;

	let codes = sqlx::query(
		r"
		SELECT
		  code,
		  reward
		FROM
		  PromoCodes
		WHERE
		  is_active
		  AND (uses < max_uses OR max_uses >= ?)
		ORDER BY
		  created_on DESC
		",
	)
	.bind(UNLIMITED_USES)
	.fetch_all(&state.database)
	.await?
	.into_iter()
	.map(|row| {
		Ok(PromoCodeInfo {
			code: row.try_get("code")?,
			reward: row.try_get("reward")?,
		})
	})
	.collect::<sqlx::Result<Vec<_>>>()?;

	Ok(Json(codes))
}

/// Redeem a promo code for a player.
///
/// The use counter is bumped with a guarded UPDATE so two concurrent redemptions of the last
/// remaining use cannot both succeed.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/game/promo-codes/redeem",
  tag = "Game",
  security(("Game Server Key" = [])),
  request_body = RedeemRequest,
  responses(
    responses::Ok<RedeemedCode>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::Conflict,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn redeem(
	AppState(state): AppState,
	key: ApiKey,
	Json(request): Json<RedeemRequest>,
) -> Result<Json<RedeemedCode>> {
	state
		.limiter
		.acquire("redeem_promo_code", request.roblox_id, REDEEM_QUOTA)?;

	let code = request.code.trim().to_uppercase();

	let row = sqlx::query(
		r"
		SELECT
		  id,
		  reward,
		  uses,
		  max_uses
		FROM
		  PromoCodes
		WHERE
		  code = ?
		  AND is_active
		",
	)
	.bind(&code)
	.fetch_optional(&state.database)
	.await?
	.ok_or_else(|| Error::not_found("promo code"))?;

	let id = row.try_get::<PromoCodeID, _>("id")?;
	let reward = row.try_get::<String, _>("reward")?;

	if !has_uses_left(row.try_get("uses")?, row.try_get("max_uses")?) {
		return Err(Error::code_exhausted());
	}

	let result = sqlx::query(
		r"
		UPDATE
		  PromoCodes
		SET
		  uses = uses + 1
		WHERE
		  id = ?
		  AND (uses < max_uses OR max_uses >= ?)
		",
	)
	.bind(id)
	.bind(UNLIMITED_USES)
	.execute(&state.database)
	.await?;

	// Someone else took the last use between our SELECT and this UPDATE.
	if result.rows_affected() == 0 {
		return Err(Error::code_exhausted());
	}

	info!(roblox_id = %request.roblox_id, %code, "redeemed promo code");

	Ok(Json(RedeemedCode { reward }))
}
