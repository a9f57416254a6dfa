//! Everything related to authorization.

mod permissions;
pub use permissions::Permissions;
