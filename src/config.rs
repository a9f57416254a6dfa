//! Module containing the [`Config`] struct, the API's configuration.

use std::env;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use derive_more::Debug;
use url::Url;

use crate::roblox::RobloxID;

/// Configuration values for the API.
///
/// These are read from the environment on startup.
#[derive(Debug, Clone)]
pub struct Config {
	/// The ip address and port the API is going to listen on.
	#[debug("{addr}")]
	pub addr: SocketAddr,

	/// The database URL that the API will connect to.
	#[debug("*****")]
	pub database_url: Url,

	/// The public URL of the API.
	#[debug("{}", public_url.as_str())]
	pub public_url: Url,

	/// The URL of the mod dashboard, used for CORS.
	#[debug("{}", dashboard_url.as_str())]
	pub dashboard_url: Url,

	/// Discord webhook URL for ban logs.
	#[debug("*****")]
	pub ban_webhook_url: Option<Url>,

	/// Discord webhook URL for warning logs.
	#[debug("*****")]
	pub warning_webhook_url: Option<Url>,

	/// Discord webhook URL for unban logs.
	#[debug("*****")]
	pub unban_webhook_url: Option<Url>,

	/// Roblox user IDs of tester accounts.
	///
	/// These accounts are allowed to skip ban appeal timers, see
	/// [`crate::game::handlers::appeals::skip_timer`].
	pub tester_ids: Vec<RobloxID>,
}

impl Config {
	/// Creates a new [`Config`] object by reading from the environment.
	pub fn new() -> anyhow::Result<Self> {
		let ip_addr = parse_from_env("RBX_API_IP")?;
		let port = parse_from_env("RBX_API_PORT")?;
		let addr = SocketAddr::new(ip_addr, port);
		let database_url = parse_from_env("DATABASE_URL")?;
		let public_url = parse_from_env("RBX_API_PUBLIC_URL")?;
		let dashboard_url = parse_from_env("RBX_API_DASHBOARD_URL")?;
		let ban_webhook_url = parse_from_env_opt("DISCORD_BAN_WEBHOOK")?;
		let warning_webhook_url = parse_from_env_opt("DISCORD_WARNING_WEBHOOK")?;
		let unban_webhook_url = parse_from_env_opt("DISCORD_UNBAN_WEBHOOK")?;
		let tester_ids = parse_id_list_from_env("RBX_API_TESTER_IDS")?;

		Ok(Self {
			addr,
			database_url,
			public_url,
			dashboard_url,
			ban_webhook_url,
			warning_webhook_url,
			unban_webhook_url,
			tester_ids,
		})
	}
}

/// Parses an environment variable into a `T`.
fn parse_from_env<T>(var: &str) -> anyhow::Result<T>
where
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	let value = env::var(var).with_context(|| format!("missing `{var}` environment variable"))?;

	if value.is_empty() {
		anyhow::bail!("`{var}` cannot be empty");
	}

	<T as FromStr>::from_str(&value).with_context(|| format!("failed to parse `{var}`"))
}

/// Parses an environment variable into an `Option<T>`, returning `None` if the variable is not
/// set or empty.
fn parse_from_env_opt<T>(var: &str) -> anyhow::Result<Option<T>>
where
	T: FromStr,
	T::Err: StdError + Send + Sync + 'static,
{
	let Some(value) = env::var(var).ok() else {
		return Ok(None);
	};

	if value.is_empty() {
		return Ok(None);
	}

	<T as FromStr>::from_str(&value)
		.map(Some)
		.with_context(|| format!("failed to parse `{var}`"))
}

/// Parses an environment variable holding a comma-separated list of Roblox user IDs.
///
/// A missing or empty variable produces an empty list.
fn parse_id_list_from_env(var: &str) -> anyhow::Result<Vec<RobloxID>> {
	let Some(value) = env::var(var).ok() else {
		return Ok(Vec::new());
	};

	value
		.split(',')
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(|id| {
			id.parse::<RobloxID>()
				.with_context(|| format!("failed to parse `{var}`"))
		})
		.collect()
}
