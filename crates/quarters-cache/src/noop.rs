//! No-op cache implementation.

use async_trait::async_trait;
use quarters_core::{CompanyFacts, FactsCache, Result};
use std::sync::Arc;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)`, so the pipeline downloads the facts
/// document again for every line item.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FactsCache for NoopCache {
    async fn get(&self, _provider: &str, _cik: &str) -> Result<Option<Arc<CompanyFacts>>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _provider: &str, _cik: &str, _facts: Arc<CompanyFacts>) -> Result<()> {
        trace!("NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}
