//! Test helpers shared across crates in the workspace.
//!
//! - [`env`]: guards for mutating environment variables such as `COLUMNS`.
//! - [`capture`]: a thread-safe recorder for reported messages.
//! - [`text`]: helpers for inspecting rendered help text.

pub mod capture;
pub mod env;
pub mod text;
