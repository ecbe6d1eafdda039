//! Cache trait for company facts fetched during a run.
//!
//! Nothing is persisted across runs. A cache only lets one invocation reuse a
//! facts document instead of downloading it once per line item.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{error::Result, types::CompanyFacts};

/// Trait for caching fetched company facts.
#[async_trait]
pub trait FactsCache: Send + Sync {
    /// Retrieves the cached facts document for a CIK.
    ///
    /// Returns `Ok(Some(facts))` if cached, `Ok(None)` if not cached.
    async fn get(&self, provider: &str, cik: &str) -> Result<Option<Arc<CompanyFacts>>>;

    /// Stores a facts document.
    async fn put(&self, provider: &str, cik: &str, facts: Arc<CompanyFacts>) -> Result<()>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
