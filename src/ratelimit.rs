//! Fixed-window rate limiting for the game-facing endpoints.
//!
//! The game servers calling us are untrusted, so every `/game` endpoint is throttled. The
//! limiter is a simple in-process map from `(action, subject)` to a request count and a window
//! expiration timestamp. State is not shared between instances and resets on restart; that is
//! acceptable for the abuse patterns this guards against.
//!
//! Every endpoint declares its own [`Quota`]. The [`RateLimiter`] lives in the application
//! [`State`], and a background task calls [`RateLimiter::sweep()`] periodically so that windows
//! of players who stopped sending requests don't accumulate forever.
//!
//! [`State`]: crate::State

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// How often [`RateLimiter::sweep()`] runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// The request budget for a single action over a single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
	/// The maximum amount of requests per window.
	pub max_requests: u32,

	/// The length of a window.
	pub window: Duration,
}

impl Quota {
	/// A quota of `max_requests` per minute.
	pub const fn per_minute(max_requests: u32) -> Self {
		Self {
			max_requests,
			window: Duration::from_secs(60),
		}
	}

	/// A quota of `max_requests` per hour.
	pub const fn per_hour(max_requests: u32) -> Self {
		Self {
			max_requests,
			window: Duration::from_secs(60 * 60),
		}
	}
}

/// The subject a request is counted against.
///
/// Most quotas apply per player, but some endpoints have no per-player component and share one
/// global window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
	/// A single window shared by all callers of the action.
	Global,

	/// A window per player.
	Player(crate::roblox::RobloxID),
}

impl From<crate::roblox::RobloxID> for Subject {
	fn from(roblox_id: crate::roblox::RobloxID) -> Self {
		Self::Player(roblox_id)
	}
}

/// Key for a single rate limit window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key {
	/// The throttled action, e.g. `"check_ban"`.
	action: &'static str,

	/// Who the requests are counted against.
	subject: Subject,
}

/// A single fixed window.
#[derive(Debug, Clone, Copy)]
struct Window {
	/// The amount of requests made in this window so far.
	count: u32,

	/// When this window expires.
	resets_on: Instant,
}

/// An in-process fixed-window rate limiter.
#[derive(Debug, Default)]
pub struct RateLimiter {
	/// The currently tracked windows.
	windows: Mutex<HashMap<Key, Window>>,
}

impl RateLimiter {
	/// Creates a new, empty [`RateLimiter`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts a request of `action` against `subject` and checks it against the given `quota`.
	///
	/// If the quota for the current window is exhausted, this returns a "rate limited" error
	/// carrying the time until the window resets.
	pub fn acquire<S>(&self, action: &'static str, subject: S, quota: Quota) -> Result<()>
	where
		S: Into<Subject>,
	{
		self.acquire_at(action, subject.into(), quota, Instant::now())
			.map_err(|retry_after| Error::rate_limited(retry_after))
	}

	/// The actual limiter logic, with an explicit `now` so it can be tested.
	fn acquire_at(
		&self,
		action: &'static str,
		subject: Subject,
		quota: Quota,
		now: Instant,
	) -> Result<(), Duration> {
		let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
		let window = windows
			.entry(Key { action, subject })
			.or_insert_with(|| Window {
				count: 0,
				resets_on: now + quota.window,
			});

		if now >= window.resets_on {
			window.count = 0;
			window.resets_on = now + quota.window;
		}

		window.count += 1;

		if window.count <= quota.max_requests {
			Ok(())
		} else {
			Err(window.resets_on.saturating_duration_since(now))
		}
	}

	/// Periodically removes expired windows.
	///
	/// This future never resolves; it is meant to be `spawn`ed once on startup.
	pub async fn sweep(&self) {
		let mut interval = tokio::time::interval(SWEEP_INTERVAL);

		// the first tick completes immediately
		interval.tick().await;

		loop {
			interval.tick().await;

			let removed = self.sweep_at(Instant::now());

			if removed > 0 {
				tracing::trace!(removed, "swept expired rate limit windows");
			}
		}
	}

	/// Removes all windows that expired before `now` and returns how many were removed.
	fn sweep_at(&self, now: Instant) -> usize {
		let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
		let before = windows.len();

		windows.retain(|_, window| window.resets_on > now);

		before - windows.len()
	}
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use super::{Quota, RateLimiter, Subject};
	use crate::roblox::RobloxID;

	#[allow(clippy::missing_docs_in_private_items)]
	const QUOTA: Quota = Quota {
		max_requests: 3,
		window: Duration::from_secs(60),
	};

	#[test]
	fn denies_requests_over_the_quota() {
		let limiter = RateLimiter::new();
		let now = Instant::now();

		for _ in 0..3 {
			limiter
				.acquire_at("test", Subject::Global, QUOTA, now)
				.expect("request within quota should pass");
		}

		let retry_after = limiter
			.acquire_at("test", Subject::Global, QUOTA, now)
			.expect_err("request over quota should fail");

		assert_eq!(retry_after, QUOTA.window, "full window should remain");
	}

	#[test]
	fn window_resets_after_it_expires() {
		let limiter = RateLimiter::new();
		let now = Instant::now();

		for _ in 0..4 {
			let _ = limiter.acquire_at("test", Subject::Global, QUOTA, now);
		}

		let later = now + QUOTA.window;

		limiter
			.acquire_at("test", Subject::Global, QUOTA, later)
			.expect("new window should have a fresh budget");
	}

	#[test]
	fn subjects_are_counted_separately() {
		let limiter = RateLimiter::new();
		let now = Instant::now();

		for _ in 0..3 {
			let _ = limiter.acquire_at("test", Subject::Player(RobloxID(1)), QUOTA, now);
		}

		limiter
			.acquire_at("test", Subject::Player(RobloxID(2)), QUOTA, now)
			.expect("other players should have their own budget");

		limiter
			.acquire_at("other_action", Subject::Player(RobloxID(1)), QUOTA, now)
			.expect("other actions should have their own budget");
	}

	#[test]
	fn sweep_removes_only_expired_windows() {
		let limiter = RateLimiter::new();
		let now = Instant::now();

		let _ = limiter.acquire_at("test", Subject::Player(RobloxID(1)), QUOTA, now);
		let _ = limiter.acquire_at(
			"test",
			Subject::Player(RobloxID(2)),
			QUOTA,
			now + Duration::from_secs(30),
		);

		let removed = limiter.sweep_at(now + QUOTA.window);

		assert_eq!(removed, 1, "only the first window should have expired");
	}
}
