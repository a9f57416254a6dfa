//! Handlers for the `/group-bans/{group_ban_id}` route.

use axum::extract::Path;
use tracing::trace;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::group_bans::GroupBanID;
use crate::openapi::responses;
use crate::state::AppState;
use crate::{Error, Result};

/// Revert a specific group ban.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  delete,
  path = "/group-bans/{group_ban_id}",
  tag = "Group Bans",
  security(("Moderator Key" = ["bans"])),
  params(("group_ban_id" = u64, Path, description = "a group ban's ID")),
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
	moderator: Moderator<{ Permissions::BANS.value() }>,
	Path(group_ban_id): Path<GroupBanID>,
) -> Result<responses::NoContent> {
	let result = sqlx::query("UPDATE GroupBans SET is_active = FALSE WHERE id = ? AND is_active")
		.bind(group_ban_id)
		.execute(&state.database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("group ban"));
	}

	trace!(%group_ban_id, moderator.id = %moderator.id, "reverted group ban");

	Ok(responses::NoContent)
}
