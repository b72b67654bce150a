//! CLI command implementations.

pub mod config;
pub mod estimate;
pub mod grant;
pub mod record;
pub mod set;
pub mod status;
