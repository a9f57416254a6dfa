//! Handlers for the `/game/appeals` routes.

use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::info;

use crate::appeals::{AppealStatus, CreatedAppeal};
use crate::authentication::ApiKey;
use crate::bans::BanID;
use crate::game::{AppealSubmission, SkipTimerRequest};
use crate::openapi::responses;
use crate::openapi::responses::{Created, NoContent};
use crate::ratelimit::Quota;
use crate::state::AppState;
use crate::{Error, Result};

/// Rate limit for appeal submissions.
const SUBMIT_QUOTA: Quota = Quota::per_hour(5);

/// Rate limit for timer skips.
const SKIP_QUOTA: Quota = Quota::per_minute(5);

/// Submit an appeal for the player's active ban.
///
/// Players may only appeal once their ban's appeal window has opened, and only while no other
/// appeal of theirs is still pending.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/game/appeals",
  tag = "Game",
  security(("Game Server Key" = [])),
  request_body = AppealSubmission,
  responses(
    responses::Created<CreatedAppeal>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::Conflict,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn submit(
	AppState(state): AppState,
	key: ApiKey,
	Json(submission): Json<AppealSubmission>,
) -> Result<Created<Json<CreatedAppeal>>> {
	state
		.limiter
		.acquire("submit_appeal", submission.roblox_id, SUBMIT_QUOTA)?;

	if submission.what_happened.trim().is_empty() || submission.why_unban.trim().is_empty() {
		return Err(Error::invalid("appeal").context("appeal text must not be empty"));
	}

	let mut transaction = state.transaction().await?;

	let ban = sqlx::query(
		r"
		SELECT
		  id,
		  appealable_on
		FROM
		  Bans
		WHERE
		  player_id = ?
		  AND is_active
		ORDER BY
		  created_on DESC
		LIMIT
		  1
		",
	)
	.bind(submission.roblox_id)
	.fetch_optional(transaction.as_mut())
	.await?
	.ok_or_else(|| Error::not_found("active ban"))?;

	let ban_id = ban.try_get::<BanID, _>("id")?;
	let appealable_on = ban.try_get::<DateTime<Utc>, _>("appealable_on")?;

	if Utc::now() < appealable_on {
		return Err(Error::appeal_window_not_open(ban_id));
	}

	let pending_appeal = sqlx::query("SELECT id FROM BanAppeals WHERE ban_id = ? AND status = ?")
		.bind(ban_id)
		.bind(AppealStatus::Pending)
		.fetch_optional(transaction.as_mut())
		.await?;

	if pending_appeal.is_some() {
		return Err(Error::appeal_already_pending(ban_id));
	}

	let appeal_id = sqlx::query(
		r"
		INSERT INTO
		  BanAppeals (ban_id, player_id, status, what_happened, why_unban, additional_info)
		VALUES
		  (?, ?, ?, ?, ?, ?)
		",
	)
	.bind(ban_id)
	.bind(submission.roblox_id)
	.bind(AppealStatus::Pending)
	.bind(&submission.what_happened)
	.bind(&submission.why_unban)
	.bind(&submission.additional_info)
	.execute(transaction.as_mut())
	.await?
	.last_insert_id()
	.into();

	transaction.commit().await?;

	info!(%appeal_id, %ban_id, roblox_id = %submission.roblox_id, "appeal submitted");

	Ok(Created(Json(CreatedAppeal { appeal_id })))
}

/// Skip the appeal timer for a tester account's active ban.
///
/// Only the accounts listed in the server configuration may do this.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  post,
  path = "/game/appeals/skip-timer",
  tag = "Game",
  security(("Game Server Key" = [])),
  request_body = SkipTimerRequest,
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::Forbidden,
    responses::NotFound,
    responses::TooManyRequests,
    responses::InternalServerError,
  ),
)]
pub async fn skip_timer(
	AppState(state): AppState,
	key: ApiKey,
	Json(request): Json<SkipTimerRequest>,
) -> Result<NoContent> {
	state
		.limiter
		.acquire("skip_appeal_timer", request.roblox_id, SKIP_QUOTA)?;

	if !state.config.tester_ids.contains(&request.roblox_id) {
		return Err(Error::forbidden().context("not a tester account"));
	}

	let result = sqlx::query(
		r"
		UPDATE
		  Bans
		SET
		  appealable_on = NOW()
		WHERE
		  player_id = ?
		  AND is_active
		",
	)
	.bind(request.roblox_id)
	.execute(&state.database)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("active ban"));
	}

	info!(roblox_id = %request.roblox_id, "skipped appeal timer");

	Ok(NoContent)
}
