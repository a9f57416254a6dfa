//! Response templates for the OpenAPI spec.
//!
//! The types in this module implement [`utoipa::IntoResponses`] so handlers can declare the
//! status codes they may produce. Some of them also implement [`IntoResponse`] and act as actual
//! response wrappers.
//!
//! [`IntoResponse`]: axum::response::IntoResponse

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response as AxumResponse};
use serde::Serialize;
use utoipa::openapi::response::Response as OpenApiResponse;
use utoipa::openapi::RefOr;
use utoipa::{IntoResponses, ToSchema};

/// A response body for paginated results.
///
/// Every `GET` endpoint that returns a list of results paginates via `limit` & `offset`
/// parameters, and includes the total amount of available rows in its response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationResponse<T> {
	/// The total amount of rows that matched the query, ignoring `limit` / `offset`.
	pub total: u64,

	/// The rows for the requested page.
	pub results: Vec<T>,
}

/// A `200 OK` response with a body of `T`.
#[derive(IntoResponses)]
#[response(status = OK)]
pub struct Ok<T: ToSchema<'static>>(#[to_schema] T);

/// Wrapper struct for turning any `T` into a [Response] with status code 201.
///
/// [Response]: axum::response::Response
pub struct Created<T>(pub T);

impl<T> IntoResponses for Created<T>
where
	T: ToSchema<'static>,
{
	fn responses() -> BTreeMap<String, RefOr<OpenApiResponse>> {
		#[allow(clippy::missing_docs_in_private_items)]
		#[derive(IntoResponses)]
		#[response(status = CREATED)]
		struct Helper<T: ToSchema<'static>>(#[to_schema] T);

		Helper::<T>::responses()
	}
}

impl<T> IntoResponse for Created<T>
where
	T: IntoResponse,
{
	fn into_response(self) -> AxumResponse {
		(StatusCode::CREATED, self.0).into_response()
	}
}

/// A `204 No Content` response.
#[derive(IntoResponses)]
#[response(status = NO_CONTENT)]
pub struct NoContent;

impl IntoResponse for NoContent {
	fn into_response(self) -> AxumResponse {
		StatusCode::NO_CONTENT.into_response()
	}
}

/// A `400 Bad Request` response.
#[derive(IntoResponses)]
#[response(status = BAD_REQUEST)]
pub struct BadRequest;

/// A `401 Unauthorized` response.
#[derive(IntoResponses)]
#[response(status = UNAUTHORIZED)]
pub struct Unauthorized;

/// A `403 Forbidden` response.
#[derive(IntoResponses)]
#[response(status = FORBIDDEN)]
pub struct Forbidden;

/// A `404 Not Found` response.
#[derive(IntoResponses)]
#[response(status = NOT_FOUND)]
pub struct NotFound;

/// A `409 Conflict` response.
#[derive(IntoResponses)]
#[response(status = CONFLICT)]
pub struct Conflict;

/// A `422 Unprocessable Entity` response.
#[derive(IntoResponses)]
#[response(status = UNPROCESSABLE_ENTITY)]
pub struct UnprocessableEntity;

/// A `429 Too Many Requests` response.
#[derive(IntoResponses)]
#[response(
  status = TOO_MANY_REQUESTS,
  description = "A rate limit was exceeded. The `Retry-After` header tells you when to try again.",
)]
pub struct TooManyRequests;

/// A `500 Internal Server Error` response.
#[derive(IntoResponses)]
#[response(status = INTERNAL_SERVER_ERROR, description = "Something unexpected happened. This is a bug; please report it.")]
pub struct InternalServerError;

/// A `502 Bad Gateway` response.
#[derive(IntoResponses)]
#[response(status = BAD_GATEWAY, description = "Communication with an external service failed (e.g. Roblox).")]
pub struct BadGateway;
