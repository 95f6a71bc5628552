//! # packagist-core
//!
//! Shared error handling for the Packagist client crates.
//!
//! The crate provides `PackagistError`, the single error enum every registry
//! operation returns, and the `PackagistResult` alias.

pub mod error;

pub use error::{PackagistError, PackagistResult};
