#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarters/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for company facts.
//!
//! This crate provides implementations of the [`FactsCache`] trait from `quarters-core`:
//!
//! - [`InMemoryCache`] - Keeps documents for the lifetime of the cache
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use quarters_core::FactsCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
