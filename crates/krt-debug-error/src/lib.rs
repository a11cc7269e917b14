//! # krt-debug-error
//!
//! Unified error handling for the krt-debug crates.
//!
//! ## Design
//!
//! - **ErrorKind**: what went wrong (e.g. FileNotFound, DeserializationFailed)
//! - **Error Context**: key/value pairs that help locate the cause
//! - **Error Source**: the wrapped underlying error, without leaking raw types
//!
//! Only the standalone tooling can fail. Registration, dumping and graph
//! building are infallible, so this crate stays small.
//!
//! ## Usage
//!
//! ```rust
//! use krt_debug_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::DeserializationFailed, "expected an array")
//!         .with_operation("graph::decode")
//!         .with_context("path", "dump.json"))
//! }
//! ```
//!
//! ## Principles
//!
//! - Fallible functions return `krt_debug_error::Result<T>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the krt-debug Error
pub type Result<T> = std::result::Result<T, Error>;
