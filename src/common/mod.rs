//! # Common Components
//!
//! Shared utilities used by the library and the `stegsvc` binary.
//!
//! ## Modules
//!
//! - [`error`]: The [`StegError`](error::StegError) taxonomy and `Result` alias
//! - [`config`]: TOML configuration loading
//! - [`logging`]: `env_logger` setup
//! - [`messages`]: JSON response bodies printed by the binary

pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
