//! Common error handling utilities for ConfigBot
//!
//! This crate provides the error types, error codes, and correlation context
//! shared by the bot server and the store servers. It keeps error reporting
//! consistent across the pipeline so every failure can be traced back to the
//! stage that produced it.
//!
//! # Key Features
//!
//! - **Startup Errors**: `ConfigBotError` for binary wiring (bind, serve, config)
//! - **Error Codes**: One structured code per pipeline failure, used in API bodies
//! - **Pipeline Stages**: `Stage` names the step a failure originated from
//! - **Context Preservation**: `ErrorContext` carries request id and stage
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ErrorContext, Stage};
//!
//! let ctx = ErrorContext::new()
//!     .with_request_id("3f1c".to_string())
//!     .with_stage(Stage::SchemaFetch);
//!
//! tracing::warn!(
//!     request_id = ctx.request_id.as_deref().unwrap_or("-"),
//!     stage = %ctx.stage.unwrap_or(Stage::Request),
//!     error_code = codes::schema::NOT_FOUND,
//!     "Schema lookup failed"
//! );
//! ```

pub mod types;
pub mod context;
pub mod codes;

pub use types::*;
pub use context::*;
