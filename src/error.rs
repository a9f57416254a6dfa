//! Runtime errors.
//!
//! This module exposes the [`Error`] type that is used across the code base for bubbling up
//! errors. Any foreign errors that can occur at runtime can be turned into an [`Error`]. Specific
//! error cases have dedicated constructors, see all the public methods on [`Error`].
//!
//! [`Error`] implements [`IntoResponse`], which means it can be returned from HTTP handlers,
//! middleware, etc.
//!
//! This module also exposes a [`Result`] type alias, which sets [`Error`] as the default `E` type
//! parameter.
//!
//! [`Error`]: struct@Error

use std::fmt::{self, Display, Formatter};
use std::panic::Location;
use std::time::Duration;

use axum::extract::rejection::PathRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::typed_header::TypedHeaderRejection;
use itertools::Itertools;
use serde_json::json;
use thiserror::Error;

use crate::authorization::Permissions;
use crate::bans::{BanID, UnbanID};

/// Type alias for a [`Result<T, E>`] with its `E` parameter set to [`Error`].
///
/// [`Result`]: std::result::Result
/// [`Error`]: struct@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The API's core error type.
///
/// Any errors that ever reach the outside should be this type.
/// It carries information about the kind of error that occurred, where it occurred, and any extra
/// information like error sources or debug messages.
///
/// This type implements [`IntoResponse`], which means it can be returned from HTTP handlers,
/// middleware, etc.
#[derive(Debug, Error)]
pub struct Error {
	/// The kind of error that occurred.
	///
	/// This is used for determining the HTTP status code and error message for the response
	/// body, when an error is returned from a request.
	kind: ErrorKind,

	/// The source code location of where the error occurred.
	///
	/// This is used for debugging / troubleshooting, and is included in logs.
	location: Location<'static>,

	/// Extra information about the error, like source errors or debug messages.
	attachments: Vec<Attachment>,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self {
			kind,
			location,
			attachments,
		} = self;

		write!(f, "[{location}] {kind}")?;

		if !attachments.is_empty() {
			write!(f, ":")?;

			for attachment in attachments.iter().rev() {
				write!(f, "\n  - {attachment}")?;
			}
		}

		Ok(())
	}
}

#[allow(clippy::missing_docs_in_private_items)]
const UNAUTHORIZED_MSG: &str = "you are not permitted to perform this action";

/// The different kinds of errors that can occur at runtime.
///
/// Every individual error case should be covered by this enum, with its own error message and any
/// extra information that is necessary to keep around.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Debug, Error)]
enum ErrorKind {
	#[error("no content")]
	NoContent,

	#[error("could not find {what}")]
	NotFound { what: String },

	#[error("invalid {what}")]
	InvalidInput { what: String },

	#[error("{UNAUTHORIZED_MSG}")]
	Unauthorized,

	#[error("invalid access key")]
	InvalidAccessKey,

	#[error("this access key is expired")]
	ExpiredAccessKey,

	#[error("{UNAUTHORIZED_MSG}")]
	Forbidden,

	#[error("{UNAUTHORIZED_MSG}")]
	InsufficientPermissions { required_permissions: Permissions },

	#[error("{what} already exists")]
	AlreadyExists { what: &'static str },

	#[error("too many requests; try again later")]
	RateLimited { retry_after: Duration },

	#[error("ban `{ban_id}` was already reverted by unban `{unban_id}`")]
	BanAlreadyReverted { ban_id: BanID, unban_id: UnbanID },

	#[error("the appeal window for ban `{ban_id}` has not opened yet")]
	AppealWindowNotOpen { ban_id: BanID },

	#[error("there is already a pending appeal for ban `{ban_id}`")]
	AppealAlreadyPending { ban_id: BanID },

	#[error("this code has reached its maximum amount of uses")]
	CodeExhausted,

	#[error("logic assertion failed: {0}")]
	Logic(String),

	#[cfg_attr(test, error("database error: {0}"))]
	#[cfg_attr(not(test), error("database error"))]
	Database(#[from] sqlx::Error),

	#[error("internal server error")]
	Reqwest(#[from] reqwest::Error),

	#[error("external api call failed: {0}")]
	ExternalApiCall(reqwest::Error),

	#[error(transparent)]
	Header(#[from] TypedHeaderRejection),

	#[error(transparent)]
	Path(#[from] PathRejection),
}

#[allow(clippy::missing_docs_in_private_items)]
type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Generic error attachments.
#[derive(Debug, derive_more::Display)]
#[display("'{context}' at {location}")]
struct Attachment {
	/// The attachment context.
	///
	/// This could be a more concrete error type, e.g. from a third party crate, or simply an
	/// error message.
	context: BoxedError,

	/// The source code location of where this attachment was created.
	location: Location<'static>,
}

impl Attachment {
	/// Creates a new [`Attachment`].
	#[track_caller]
	fn new<C>(context: C) -> Self
	where
		C: Into<BoxedError>,
	{
		Self {
			context: context.into(),
			location: *Location::caller(),
		}
	}
}

impl Error {
	/// Creates a new [`Error`] of the given [`ErrorKind`].
	///
	/// [`Error`]: struct@Error
	#[track_caller]
	fn new<E>(kind: E) -> Self
	where
		E: Into<ErrorKind>,
	{
		Self {
			kind: kind.into(),
			location: *Location::caller(),
			attachments: Vec::new(),
		}
	}

	/// Attach additional context to an error.
	///
	/// This can be another, more concrete, error type, or simply an error message.
	/// If `ctx` is also an [`Error`], it will have its attachments transferred to `self`.
	///
	/// [`Error`]: struct@Error
	#[track_caller]
	pub(crate) fn context<E>(mut self, ctx: E) -> Self
	where
		E: Into<BoxedError>,
	{
		match Into::<BoxedError>::into(ctx).downcast::<Self>() {
			Ok(mut err) => {
				self.attachments.append(&mut err.attachments);
				self.attachments.push(Attachment::new(err.kind));
			}
			Err(other) => {
				self.attachments.push(Attachment::new(other));
			}
		}

		self
	}

	/// A generic `204 No Content` error.
	///
	/// This should be returned from `PUT` / `PATCH` / `DELETE` handlers, as well as `GET`
	/// handlers that would otherwise return an empty response body.
	#[track_caller]
	pub(crate) fn no_content() -> Self {
		Self::new(ErrorKind::NoContent)
	}

	/// An error signaling that a resource could not be found.
	///
	/// Produces a `404 Not Found` status.
	#[track_caller]
	pub(crate) fn not_found<T>(what: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::NotFound {
			what: what.to_string(),
		})
	}

	/// An error signaling invalid user input.
	///
	/// Produces a `400 Bad Request` status.
	#[track_caller]
	pub(crate) fn invalid<T>(what: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::InvalidInput {
			what: what.to_string(),
		})
	}

	/// A generic `401 Unauthorized` error.
	///
	/// If you can, you should [attach additional context][context] to such an error to make
	/// debugging the cause of the error easier later.
	///
	/// [context]: Error::context()
	#[track_caller]
	pub(crate) fn unauthorized() -> Self {
		Self::new(ErrorKind::Unauthorized)
	}

	/// An error signaling an unknown authentication key.
	///
	/// Produces a `401 Unauthorized` status.
	#[track_caller]
	pub(crate) fn invalid_key() -> Self {
		Self::new(ErrorKind::InvalidAccessKey)
	}

	/// An error signaling an expired authentication key.
	///
	/// Produces a `401 Unauthorized` status.
	#[track_caller]
	pub(crate) fn expired_key() -> Self {
		Self::new(ErrorKind::ExpiredAccessKey)
	}

	/// An error signaling that the caller is authenticated, but not allowed to perform this
	/// particular action.
	///
	/// Produces a `403 Forbidden` status.
	#[track_caller]
	pub(crate) fn forbidden() -> Self {
		Self::new(ErrorKind::Forbidden)
	}

	/// An error signaling an authorization failure caused by insufficient permissions.
	///
	/// For more information about permissions, see [`crate::authorization::Permissions`].
	///
	/// Produces a `401 Unauthorized` status.
	#[track_caller]
	pub(crate) fn insufficient_permissions(required_permissions: Permissions) -> Self {
		Self::new(ErrorKind::InsufficientPermissions {
			required_permissions,
		})
	}

	/// An error signaling that a resource already exists.
	///
	/// Produces a `409 Conflict` status.
	#[track_caller]
	pub(crate) fn already_exists(what: &'static str) -> Self {
		Self::new(ErrorKind::AlreadyExists { what })
	}

	/// An error produced by the [rate limiter] when a client has exhausted its quota for the
	/// current window.
	///
	/// Produces a `429 Too Many Requests` status with a `Retry-After` header.
	///
	/// [rate limiter]: crate::ratelimit
	#[track_caller]
	pub(crate) fn rate_limited(retry_after: Duration) -> Self {
		Self::new(ErrorKind::RateLimited { retry_after })
	}

	/// An error that can occur when [unbanning] players.
	///
	/// Any given ban can only ever be reverted once. When an unban request is made for a ban
	/// that has already been reverted, that should produce an error.
	///
	/// Produces a `409 Conflict` status.
	///
	/// [unbanning]: crate::bans::handlers::by_id::delete
	#[track_caller]
	pub(crate) fn ban_already_reverted(ban_id: BanID, unban_id: UnbanID) -> Self {
		Self::new(ErrorKind::BanAlreadyReverted { ban_id, unban_id })
	}

	/// An error that can occur when [submitting appeals].
	///
	/// Bans carry an `appealable_on` timestamp, and appeals submitted before that timestamp
	/// has passed are rejected.
	///
	/// Produces a `409 Conflict` status.
	///
	/// [submitting appeals]: crate::game::handlers::appeals::submit
	#[track_caller]
	pub(crate) fn appeal_window_not_open(ban_id: BanID) -> Self {
		Self::new(ErrorKind::AppealWindowNotOpen { ban_id })
	}

	/// An error that can occur when [submitting appeals].
	///
	/// Every ban can only have one pending appeal at a time.
	///
	/// Produces a `409 Conflict` status.
	///
	/// [submitting appeals]: crate::game::handlers::appeals::submit
	#[track_caller]
	pub(crate) fn appeal_already_pending(ban_id: BanID) -> Self {
		Self::new(ErrorKind::AppealAlreadyPending { ban_id })
	}

	/// An error that can occur when [redeeming promo codes].
	///
	/// Codes with a finite `max_uses` stop working once their use count has been exhausted.
	///
	/// Produces a `409 Conflict` status.
	///
	/// [redeeming promo codes]: crate::game::handlers::promo_codes::redeem
	#[track_caller]
	pub(crate) fn code_exhausted() -> Self {
		Self::new(ErrorKind::CodeExhausted)
	}

	/// A generic `500 Internal Server Error`.
	///
	/// This constructor is reserved for errors that _should not_ occur, but _may_ occur. If
	/// such an error is ever returned, that's a bug.
	#[track_caller]
	pub(crate) fn logic<T>(message: T) -> Self
	where
		T: Display,
	{
		Self::new(ErrorKind::Logic(message.to_string()))
	}

	/// An error that can occur when making HTTP requests to external APIs such as the Roblox
	/// Users API.
	///
	/// Produces a `502 Bad Gateway` status.
	#[track_caller]
	pub(crate) fn external_api_call(source: reqwest::Error) -> Self {
		Self::new(ErrorKind::ExternalApiCall(source))
	}
}

impl IntoResponse for Error {
	#[track_caller]
	fn into_response(self) -> Response {
		use ErrorKind as E;

		let message = self.kind.to_string();
		let status = match self.kind {
			E::NoContent => StatusCode::NO_CONTENT,
			E::InvalidInput { .. } | E::Header(_) => StatusCode::BAD_REQUEST,
			E::Unauthorized
			| E::InvalidAccessKey
			| E::ExpiredAccessKey
			| E::InsufficientPermissions { .. } => StatusCode::UNAUTHORIZED,
			E::Forbidden => StatusCode::FORBIDDEN,
			E::NotFound { .. } => StatusCode::NOT_FOUND,
			E::AlreadyExists { .. }
			| E::BanAlreadyReverted { .. }
			| E::AppealWindowNotOpen { .. }
			| E::AppealAlreadyPending { .. }
			| E::CodeExhausted => StatusCode::CONFLICT,
			E::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
			E::Logic(_) | E::Database(_) | E::Reqwest(_) => StatusCode::INTERNAL_SERVER_ERROR,
			E::ExternalApiCall(_) => StatusCode::BAD_GATEWAY,
			E::Path(ref rej) => rej.status(),
		};

		if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!(?self, "internal server error occurred");
		} else {
			tracing::debug! {
				location = %self.location,
				kind = ?self.kind,
				attachments = ?self.attachments,
				error_message = %message,
				"returning error from request handler"
			};
		}

		let retry_after = if let E::RateLimited { retry_after } = self.kind {
			Some(retry_after.as_secs().max(1))
		} else {
			None
		};

		let mut json = json!({ "message": message });

		#[allow(clippy::indexing_slicing)]
		if !self.attachments.is_empty() {
			json["debug_info"] = self
				.attachments
				.iter()
				.rev()
				.map(|attachment| format!("{attachment}"))
				.collect_vec()
				.into();
		}

		let mut response = (status, Json(json)).into_response();

		if let Some(seconds) = retry_after {
			if let Ok(value) = seconds.to_string().parse() {
				response.headers_mut().insert(header::RETRY_AFTER, value);
			}
		}

		response
	}
}

impl From<sqlx::Error> for Error {
	#[track_caller]
	fn from(error: sqlx::Error) -> Self {
		use sqlx::Error as E;

		match error {
			error @ (E::Configuration(_) | E::Tls(_) | E::AnyDriverError(_) | E::Migrate(_)) => {
				unreachable!("these do not happen after initial setup ({error})");
			}
			error => Self::new(error),
		}
	}
}

impl From<reqwest::Error> for Error {
	#[track_caller]
	fn from(error: reqwest::Error) -> Self {
		if matches!(error.status(), Some(status) if status.is_server_error()) {
			Self::new(ErrorKind::ExternalApiCall(error))
		} else {
			Self::new(ErrorKind::Reqwest(error))
		}
	}
}

impl From<TypedHeaderRejection> for Error {
	#[track_caller]
	fn from(rejection: TypedHeaderRejection) -> Self {
		Self::new(rejection)
	}
}

impl From<PathRejection> for Error {
	#[track_caller]
	fn from(rejection: PathRejection) -> Self {
		Self::new(rejection)
	}
}

impl<E> From<crate::make_id::ConvertIDError<E>> for Error
where
	E: std::error::Error + Send + Sync + 'static,
{
	#[track_caller]
	fn from(error: crate::make_id::ConvertIDError<E>) -> Self {
		Self::logic("failed to convert a raw database id").context(error)
	}
}
