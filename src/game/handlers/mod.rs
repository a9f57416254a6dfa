//! HTTP handlers for the `/game` routes.
//!
//! Every handler in here authenticates via [`ApiKey`] and consumes from a rate limit quota
//! before doing anything else. The quotas are declared as constants next to the handlers they
//! belong to.
//!
//! [`ApiKey`]: crate::authentication::ApiKey

pub mod bans;
pub mod warnings;
pub mod players;
pub mod promo_codes;
pub mod appeals;
pub mod group_bans;
