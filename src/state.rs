//! The API's main application state.
//!
//! This is initialized once on startup, and then passed around the application by axum.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request;
use derive_more::Debug;
use sqlx::{MySql, Pool, Transaction};

use crate::ratelimit::RateLimiter;
use crate::Result;

/// Extractor for the application's [`State`].
///
/// Handlers destructure this to get at the inner `&'static State`.
#[derive(Debug, Clone, Copy)]
pub struct AppState(pub &'static State);

#[async_trait]
impl FromRequestParts<&'static State> for AppState {
	type Rejection = Infallible;

	async fn from_request_parts(
		_parts: &mut request::Parts,
		state: &&'static State,
	) -> Result<Self, Infallible> {
		Ok(Self(state))
	}
}

/// The main application state.
///
/// A `'static` reference to this is passed around the application.
#[derive(Debug)]
pub struct State {
	/// The API configuration.
	pub config: crate::Config,

	/// Connection pool to the backing database.
	#[debug(skip)]
	pub database: Pool<MySql>,

	/// HTTP client for making requests to external APIs.
	#[debug(skip)]
	pub http_client: reqwest::Client,

	/// Rate limiter for the game-facing endpoints.
	pub limiter: RateLimiter,
}

impl State {
	/// Creates a new [`State`] object and leaks it on the heap.
	///
	/// **This function should only ever be called once; it leaks memory.**
	pub async fn new(config: crate::Config) -> Result<&'static Self> {
		let database = Pool::connect(config.database_url.as_str()).await?;
		let http_client = reqwest::Client::new();
		let limiter = RateLimiter::new();

		Ok(Box::leak(Box::new(Self {
			config,
			database,
			http_client,
			limiter,
		})))
	}

	/// Begins a new database transaction.
	pub async fn transaction(&self) -> Result<Transaction<'static, MySql>> {
		self.database.begin().await.map_err(Into::into)
	}
}
