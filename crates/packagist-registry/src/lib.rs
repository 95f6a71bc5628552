//! Packagist registry client
//!
//! This crate lists package names and fetches package metadata from the
//! Packagist HTTP API, decoding responses into typed results.

pub mod client;
pub mod api;

// Re-export main types
pub use client::{RegistryClient, ClientConfig, PACKAGIST_HOST};
pub use api::{PackageListResult, PackageResult, Package, Version};

use packagist_core::error::PackagistError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, PackagistError>;
