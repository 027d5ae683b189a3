//! Confluence REST client library
//!
//! This library exposes the Confluence REST API (content, spaces, users,
//! groups, search, settings, templates, relations, audit and long tasks) as
//! async method calls, plus the pieces the `confluence-rest` CLI is built
//! from.

pub mod cli;
pub mod color;
pub mod commands;
pub mod confluence;
pub mod credentials;

pub use confluence::{ApiError, ClientConfig, ConfluenceClient, Query, create_client};
