//! # Lark Authentication node
//!
//! Exchanges a Lark custom app's `app_id` / `app_secret` for a tenant access
//! token, one POST per input item, and maps each response (or failure) to an
//! output item.
//!
//! Modules:
//! - `node` — descriptor, parameter access, the `TokenRequester` loop, errors
//! - `sources` — outbound JSON requests and the token response view
//! - `config` — YAML configuration for the CLI host
//! - `observability` — prometheus metrics
//! - `utils` — logging and constants

pub mod config;
pub mod node;
pub mod observability;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::types::ServiceConfig;
pub use crate::node::{InputItem, NodeApiError, NodeDescription, OutputItem, TokenRequester};
