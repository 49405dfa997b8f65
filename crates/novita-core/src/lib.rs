//! # novita-core
//!
//! Core types and utilities for working with the Novita GPU cloud API.
//!
//! This crate provides the transport layer, error translation, configuration
//! and the small value types shared by every resource client.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Client configuration and API key bootstrap
//! - [`request`] - Request descriptions, operations and the executor contract
//! - [`transport`] - Blocking and asynchronous HTTP transports
//! - [`query`] - Query-string builder
//! - [`id`] - Strongly-typed resource identifiers
//! - [`price`] - Raw price units and USD conversion
//! - [`serde_helpers`] - Lenient deserializers for loosely typed wire fields

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod id;
pub mod price;
pub mod query;
pub mod request;
pub mod serde_helpers;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{Error, ErrorPayload, Result};
pub use request::{ApiRequest, Executor, Operation};
pub use transport::{AsyncTransport, BlockingTransport};
