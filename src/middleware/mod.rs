//! Various middlewares.

pub mod logging;
pub mod cors;
