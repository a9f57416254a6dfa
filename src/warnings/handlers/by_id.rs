//! Handlers for the `/warnings/{warning_id}` route.

use axum::extract::Path;
use tracing::trace;

use crate::authentication::Moderator;
use crate::authorization::Permissions;
use crate::openapi::responses;
use crate::state::AppState;
use crate::warnings::WarningID;
use crate::{Error, Result};

/// Delete a specific warning.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  delete,
  path = "/warnings/{warning_id}",
  tag = "Warnings",
  security(("Moderator Key" = ["warnings"])),
  params(("warning_id" = u64, Path, description = "a warning's ID")),
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
	moderator: Moderator<{ Permissions::WARNINGS.value() }>,
	Path(warning_id): Path<WarningID>,
) -> Result<responses::NoContent> {
	let result = sqlx::query("DELETE FROM Warnings WHERE id = ?")
		.bind(warning_id)
		.execute(&state.database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("warning"));
	}

	trace!(%warning_id, moderator.id = %moderator.id, "deleted warning");

	Ok(responses::NoContent)
}
