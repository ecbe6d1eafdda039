//! End-to-end run for one ticker: identity lookup, fact retrieval, per line
//! item aggregation and table assembly.

use std::sync::Arc;

use quarters_cache::InMemoryCache;
use quarters_core::{
    CompanyFacts, CompanyIdentity, FactSource, FactsCache, IdentityProvider, Result, Symbol,
};
use tracing::{debug, info, warn};

use crate::aggregate::{PeriodAggregator, QuarterMap};
use crate::line_items::{INCOME_STATEMENT, LineItemSpec};
use crate::lookup::{PeriodQuery, PeriodValue, find_period};
use crate::snapshot::AnnualSnapshot;
use crate::summary::QuarterSummary;
use crate::table::{QuarterlyTable, build};

/// Result of [`QuarterlyPipeline::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuarterlyStatement {
    /// The resolved company, `None` when the ticker is unknown.
    pub company: Option<CompanyIdentity>,
    /// Records by quarter.
    pub records: QuarterMap,
    /// Records ordered most recent first.
    pub table: QuarterlyTable,
}

impl QuarterlyStatement {
    /// Returns true if no quarter has any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Margins for the most recent quarter.
    #[must_use]
    pub fn latest_summary(&self) -> Option<QuarterSummary> {
        self.records
            .values()
            .next_back()
            .map(QuarterSummary::from_record)
    }
}

/// Drives the collaborators for one ticker at a time.
///
/// Every await is sequential. Each line item asks the cache for the facts
/// document and fetches it on a miss, so with [`NoopCache`](quarters_cache::NoopCache)
/// the document is downloaded once per line item.
pub struct QuarterlyPipeline {
    identity: Arc<dyn IdentityProvider>,
    facts: Arc<dyn FactSource>,
    cache: Arc<dyn FactsCache>,
    line_items: Vec<LineItemSpec>,
}

impl std::fmt::Debug for QuarterlyPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuarterlyPipeline")
            .field("identity", &self.identity.name())
            .field("facts", &self.facts.name())
            .field("line_items", &self.line_items.len())
            .finish_non_exhaustive()
    }
}

impl QuarterlyPipeline {
    /// Creates a pipeline over the income statement with an in-memory cache.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, facts: Arc<dyn FactSource>) -> Self {
        Self {
            identity,
            facts,
            cache: Arc::new(InMemoryCache::new()),
            line_items: INCOME_STATEMENT.to_vec(),
        }
    }

    /// Creates a pipeline backed by SEC EDGAR for both lookups.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    #[cfg(feature = "edgar")]
    pub fn edgar(config: quarters_edgar::EdgarConfig) -> Result<Self> {
        let provider = Arc::new(quarters_edgar::EdgarProvider::new(config)?);
        Ok(Self::new(provider.clone(), provider))
    }

    /// Replaces the cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn FactsCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the line items.
    #[must_use]
    pub fn with_line_items(mut self, line_items: Vec<LineItemSpec>) -> Self {
        self.line_items = line_items;
        self
    }

    /// Line items in display order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItemSpec] {
        &self.line_items
    }

    /// Resolves a ticker.
    pub async fn company(&self, symbol: &Symbol) -> Result<Option<CompanyIdentity>> {
        self.identity.company_identity(symbol).await
    }

    /// Returns the facts document for a company, from the cache when present.
    ///
    /// Cache failures are logged and otherwise ignored.
    pub async fn company_facts(&self, company: &CompanyIdentity) -> Result<Arc<CompanyFacts>> {
        let provider = self.facts.name();

        match self.cache.get(provider, &company.cik).await {
            Ok(Some(cached)) => {
                debug!(provider, cik = %company.cik, "Cache hit for company facts");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(provider, error = %e, "Cache lookup failed"),
        }

        let facts = Arc::new(self.facts.company_facts(&company.cik).await?);
        if let Err(e) = self.cache.put(provider, &company.cik, facts.clone()).await {
            warn!(provider, error = %e, "Failed to cache company facts");
        }
        Ok(facts)
    }

    /// Builds the quarterly statement for a ticker.
    ///
    /// An unknown ticker yields an empty statement, not an error. Any
    /// transport failure aborts the run and nothing is returned.
    pub async fn run(&self, symbol: &Symbol) -> Result<QuarterlyStatement> {
        let Some(company) = self.company(symbol).await? else {
            info!(symbol = %symbol, "Ticker did not resolve to a company");
            return Ok(QuarterlyStatement::default());
        };
        info!(
            symbol = %symbol,
            name = %company.name,
            cik = %company.cik,
            "Building quarterly statement"
        );

        let mut aggregator = PeriodAggregator::new();
        for spec in &self.line_items {
            let facts = self.company_facts(&company).await?;
            aggregator.add_line_item(spec, |tag| facts.usd_gaap_series(tag));
        }

        let records = aggregator.finish();
        for record in records.values() {
            let mismatched = record.mismatched_dates();
            if !mismatched.is_empty() {
                debug!(quarter = %record.key, ?mismatched, "Quarter has mixed period ends");
            }
        }

        let table = build(&records, &self.line_items);
        info!(symbol = %symbol, quarters = table.len(), "Quarterly statement built");

        Ok(QuarterlyStatement {
            company: Some(company),
            records,
            table,
        })
    }

    /// Latest 10-K values for a ticker, `None` when the ticker is unknown.
    pub async fn snapshot(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<(CompanyIdentity, AnnualSnapshot)>> {
        let Some(company) = self.company(symbol).await? else {
            return Ok(None);
        };
        let facts = self.company_facts(&company).await?;
        let snapshot = AnnualSnapshot::from_facts(&facts);
        Ok(Some((company, snapshot)))
    }

    /// One period of one concept for a ticker.
    ///
    /// `None` when the ticker is unknown; the inner value is `None` when no
    /// candidate tag has a matching period.
    pub async fn lookup(
        &self,
        symbol: &Symbol,
        query: &PeriodQuery,
    ) -> Result<Option<(CompanyIdentity, Option<PeriodValue>)>> {
        let Some(company) = self.company(symbol).await? else {
            return Ok(None);
        };
        let facts = self.company_facts(&company).await?;
        let found = find_period(&facts, query);
        Ok(Some((company, found)))
    }
}
