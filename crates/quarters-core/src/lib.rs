#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarters/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for quarterly income statement reconstruction.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`FactPoint`](types::FactPoint) - One disclosed value for one concept
//! - [`CompanyFacts`](types::CompanyFacts) - Every fact a company has filed
//! - [`classify`](period::classify) - Duration-aware period classification
//! - [`IdentityProvider`](provider::IdentityProvider) - Ticker to company lookup
//! - [`FactSource`](provider::FactSource) - Company facts retrieval
//! - [`FactsCache`](cache::FactsCache) - Per-run caching abstraction

/// Cache trait for fetched company facts.
pub mod cache;
/// Error types for data operations.
pub mod error;
/// Period classification of disclosed facts.
pub mod period;
/// Provider traits for identity lookup and fact retrieval.
pub mod provider;
/// Core data types (Symbol, FactPoint, CompanyFacts, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::FactsCache;
pub use error::{DataError, Result};
pub use period::{PeriodClass, classify, duration_days};
pub use provider::{DataProvider, FactSource, IdentityProvider};
pub use types::{
    CompanyFacts, CompanyIdentity, ConceptSeries, FactPoint, FiscalPeriod, QuarterKey, Symbol,
};
