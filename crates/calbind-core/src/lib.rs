//! Shared layer for the calbind workspace: decode options, the domain model
//! the mapping layer binds to, and core error types.
//!
//! This crate deliberately carries no wire-format knowledge; everything that
//! touches content lines, grammars, or codecs lives in `calbind-rfc`.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;

pub use config::{DecodeOptions, TimeZonePolicy, load_options};
pub use error::{CoreError, CoreResult};
