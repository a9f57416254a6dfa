//! Integration tests.
//!
//! Every test gets its own MariaDB container and API instance. [`Context::new()`] starts the
//! container, runs the migrations, seeds a minimal set of fixtures, and boots the API on a
//! random port.

#![allow(clippy::indexing_slicing)]

use std::fmt::Display;
use std::net::SocketAddr;

use sqlx::migrate::Migrator;
use sqlx::MySqlPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mariadb::Mariadb;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::authorization::Permissions;
use crate::roblox::RobloxID;
use crate::Config;

mod bans;
mod promo_codes;
mod appeals;

/// The schema, shared with production deployments.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Roblox ID of the seeded tester account.
const TESTER_ID: u64 = 1003;

/// Test "context" to take care of setup & cleanup for integration tests.
struct Context {
	/// An HTTP client for making requests.
	http_client: reqwest::Client,

	/// A connection to the test database.
	database: MySqlPool,

	/// A moderator key holding admin permissions.
	moderator_key: Uuid,

	/// A game server key.
	game_key: Uuid,

	/// The address the API listens on.
	addr: SocketAddr,

	/// Shuts the API down when dropped.
	_shutdown: oneshot::Sender<()>,

	/// Keeps the database container alive for the duration of the test.
	_container: ContainerAsync<Mariadb>,
}

impl Context {
	/// Boots a fresh database and API instance.
	async fn new() -> anyhow::Result<Self> {
		let container = Mariadb::default().start().await?;
		let port = container.get_host_port_ipv4(3306).await?;
		let database_url = format!("mysql://root@127.0.0.1:{port}/test");
		let database = MySqlPool::connect(&database_url).await?;

		MIGRATOR.run(&database).await?;

		let moderator_key = Uuid::new_v4();
		let game_key = Uuid::new_v4();

		seed(&database, moderator_key, game_key).await?;

		let config = Config {
			addr: SocketAddr::from(([127, 0, 0, 1], 0)),
			database_url: database_url.parse()?,
			public_url: "http://127.0.0.1".parse()?,
			dashboard_url: "http://127.0.0.1:5173".parse()?,
			ban_webhook_url: None,
			warning_webhook_url: None,
			unban_webhook_url: None,
			tester_ids: vec![RobloxID(TESTER_ID)],
		};

		let server = crate::server(config).await?;
		let addr = server.local_addr()?;
		let (shutdown, rx) = oneshot::channel();

		tokio::spawn(async move {
			server
				.with_graceful_shutdown(async move {
					let _ = rx.await;
				})
				.await
				.expect("server crashed");
		});

		Ok(Self {
			http_client: reqwest::Client::new(),
			database,
			moderator_key,
			game_key,
			addr,
			_shutdown: shutdown,
			_container: container,
		})
	}

	/// Builds a full URL for the given path.
	fn url<P>(&self, path: P) -> String
	where
		P: Display,
	{
		format!("http://{}{path}", self.addr)
	}
}

/// Seeds the fixtures shared by every test.
///
/// One admin moderator with a dashboard key, one game server key, and three players. Player
/// `1003` is registered as a tester account.
async fn seed(database: &MySqlPool, moderator_key: Uuid, game_key: Uuid) -> anyhow::Result<()> {
	let moderator_id =
		sqlx::query("INSERT INTO Moderators (name, permissions) VALUES ('carson', ?)")
			.bind(Permissions::ADMIN.value())
			.execute(database)
			.await?
			.last_insert_id();

	sqlx::query("INSERT INTO Credentials (`key`, name, moderator_id) VALUES (?, 'test dashboard key', ?)")
		.bind(moderator_key)
		.bind(moderator_id)
		.execute(database)
		.await?;

	sqlx::query("INSERT INTO Credentials (`key`, name) VALUES (?, 'test game key')")
		.bind(game_key)
		.execute(database)
		.await?;

	sqlx::query(
		r"
		INSERT INTO
		  Players (id, username)
		VALUES
		  (1001, 'grodus'),
		  (1002, 'fawful'),
		  (1003, 'junebug')
		",
	)
	.execute(database)
	.await?;

	Ok(())
}

#[ctor::ctor]
fn setup() {
	use std::{env, io};

	use tracing_subscriber::EnvFilter;

	if let Ok(rust_log) = env::var("RUST_TEST_LOG") {
		tracing_subscriber::fmt()
			.with_target(true)
			.with_writer(io::stderr)
			.compact()
			.with_env_filter(EnvFilter::new(rust_log))
			.init();
	}
}

#[tokio::test]
async fn hello_world() -> anyhow::Result<()> {
	let ctx = Context::new().await?;

	let response = ctx.http_client.get(ctx.url("/")).send().await?;

	assert_eq!(response.status(), 200, "unexpected status");
	assert_eq!(response.text().await?, "(͡ ͡° ͜ つ ͡͡°)", "unexpected body");

	Ok(())
}
