//! In-memory cache implementation.

use async_trait::async_trait;
use quarters_core::{CompanyFacts, FactsCache, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Key for cached facts documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FactsKey {
    provider: String,
    cik: String,
}

impl FactsKey {
    fn new(provider: &str, cik: &str) -> Self {
        Self {
            provider: provider.to_string(),
            cik: cik.to_string(),
        }
    }
}

/// In-memory cache for one run.
///
/// Documents are shared through `Arc`, so a hit costs a reference count
/// rather than a copy of the whole document.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    facts: RwLock<HashMap<FactsKey, Arc<CompanyFacts>>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached documents.
    pub async fn len(&self) -> usize {
        self.facts.read().await.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.facts.read().await.is_empty()
    }
}

#[async_trait]
impl FactsCache for InMemoryCache {
    #[instrument(skip(self), fields(provider = %provider, cik = %cik))]
    async fn get(&self, provider: &str, cik: &str) -> Result<Option<Arc<CompanyFacts>>> {
        let cache = self.facts.read().await;
        match cache.get(&FactsKey::new(provider, cik)) {
            Some(facts) => {
                debug!("Cache hit for company facts");
                Ok(Some(Arc::clone(facts)))
            }
            None => {
                debug!("Cache miss for company facts");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, facts), fields(provider = %provider, cik = %cik))]
    async fn put(&self, provider: &str, cik: &str, facts: Arc<CompanyFacts>) -> Result<()> {
        let count = facts.fact_count();
        let mut cache = self.facts.write().await;
        cache.insert(FactsKey::new(provider, cik), facts);
        debug!("Cached company facts with {} values", count);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut cache = self.facts.write().await;
        let count = cache.len();
        cache.clear();
        debug!("Cleared {} cached documents", count);
        Ok(())
    }
}
