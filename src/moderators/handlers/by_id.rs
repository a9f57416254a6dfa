//! Handlers for the `/moderators/{moderator_id}` route.

use axum::extract::Path;
use axum::Json;
use sqlx::QueryBuilder;
use tracing::info;

use crate::authentication;
use crate::authorization::Permissions;
use crate::moderators::{queries, Moderator, ModeratorID, ModeratorUpdate};
use crate::openapi::responses;
use crate::state::AppState;
use crate::{Error, Result};

/// Fetch a specific moderator by their ID.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  get,
  path = "/moderators/{moderator_id}",
  tag = "Moderators",
  security(("Moderator Key" = [])),
  params(("moderator_id" = u64, Path, description = "a moderator's ID")),
  responses(
    responses::Ok<Moderator>,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn get(
	AppState(state): AppState,
	_moderator: authentication::Moderator,
	Path(moderator_id): Path<ModeratorID>,
) -> Result<Json<Moderator>> {
	let mut query = QueryBuilder::new(queries::SELECT);

	query.push(" WHERE m.id = ").push_bind(moderator_id);

	let moderator = query
		.build_query_as::<Moderator>()
		.fetch_optional(&state.database)
		.await?
		.ok_or_else(|| Error::not_found("moderator"))?;

	Ok(Json(moderator))
}

/// Update a specific moderator's permissions.
#[tracing::instrument(level = "debug", skip(state))]
#[utoipa::path(
  put,
  path = "/moderators/{moderator_id}",
  tag = "Moderators",
  security(("Moderator Key" = ["admin"])),
  params(("moderator_id" = u64, Path, description = "a moderator's ID")),
  request_body = ModeratorUpdate,
  responses(
    responses::NoContent,
    responses::BadRequest,
    responses::Unauthorized,
    responses::NotFound,
    responses::InternalServerError,
  ),
)]
pub async fn put(
	AppState(state): AppState,
	admin: authentication::Moderator<{ Permissions::ADMIN.value() }>,
	Path(moderator_id): Path<ModeratorID>,
	Json(ModeratorUpdate { permissions }): Json<ModeratorUpdate>,
) -> Result<responses::NoContent> {
	let result = sqlx::query("UPDATE Moderators SET permissions = ? WHERE id = ?")
		.bind(permissions)
		.bind(moderator_id)
		.execute(&state.database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::not_found("moderator"));
	}

	info! {
		target: "rbx_mod_api::audit_log",
		%moderator_id,
		admin.id = %admin.id,
		%permissions,
		"updated moderator permissions",
	};

	Ok(responses::NoContent)
}
