//! Provider traits for identity lookup and fact retrieval.
//!
//! This module defines the collaborators the reconstruction pipeline needs:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`IdentityProvider`] - Ticker to company identity
//! - [`FactSource`] - Company facts retrieval

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{CompanyFacts, CompanyIdentity, Symbol},
};

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Resolves a ticker symbol to a company identity.
#[async_trait]
pub trait IdentityProvider: DataProvider {
    /// Looks up the company behind a ticker.
    ///
    /// Returns `Ok(None)` when no company matches. Transport failures are
    /// returned as errors.
    async fn company_identity(&self, symbol: &Symbol) -> Result<Option<CompanyIdentity>>;
}

/// Retrieves every fact a company has filed.
///
/// Failure contract, shared by every caller:
///
/// - Connection failures, timeouts and non-success statuses are errors and
///   abort the run.
/// - A body that cannot be parsed, or that lacks the expected structure,
///   is an empty [`CompanyFacts`], not an error.
#[async_trait]
pub trait FactSource: DataProvider {
    /// Fetches the facts document for a zero-padded CIK.
    async fn company_facts(&self, cik: &str) -> Result<CompanyFacts>;
}
