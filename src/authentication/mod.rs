//! Everything related to authentication.
//!
//! There are two kinds of callers, and they authenticate differently:
//!
//! 1. Game servers hold an opaque key, which they send in the [`API_KEY_HEADER`] header on every
//!    request. See [`ApiKey`].
//! 2. Moderators using the dashboard hold personal keys, which they send as `Bearer` tokens. See
//!    [`Moderator`].
//!
//! Both kinds of keys live in the `Credentials` table; rows with a `moderator_id` belong to a
//! moderator, rows without belong to a game server.

mod api_key;
pub use api_key::{ApiKey, API_KEY_HEADER};

mod moderator;
pub use moderator::Moderator;
