//! Synchronous client core for the Simpei todo API.
//!
//! # Overview
//! Covers every endpoint the server exposes: health, list (with skip/limit),
//! get, create, partial update, delete and filter-by-status. Requests are
//! built as plain data and responses parsed from plain data; the caller owns
//! the transport.
//!
//! # Design
//! - `TodoClient` is stateless apart from its base URL.
//! - Wire types are defined here rather than shared with the server crate.
//! - Server error bodies (`{"detail": ...}`) surface in [`ClientError`].

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo, Welcome};
