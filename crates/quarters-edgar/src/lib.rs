#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarters/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR data provider for company facts.
//!
//! This crate provides:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Company facts from the XBRL `companyfacts` API
//! - A rate limiter that spaces requests at least 100ms apart by default
//!
//! # Example
//!
//! ```no_run
//! use quarters_edgar::{EdgarConfig, EdgarProvider};
//! use quarters_core::{FactSource, IdentityProvider, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EdgarConfig::default().with_contact_email("contact@example.com");
//!     let provider = EdgarProvider::new(config)?;
//!
//!     if let Some(company) = provider.company_identity(&Symbol::new("AAPL")).await? {
//!         let facts = provider.company_facts(&company.cik).await?;
//!         println!("{}: {} facts", company.name, facts.fact_count());
//!     }
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use quarters_core::{
    CompanyFacts, CompanyIdentity, DataError, DataProvider, FactSource, IdentityProvider, Result,
    Symbol,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Client configuration.
pub mod config;
/// Minimum-interval rate limiting.
pub mod rate_limit;
mod response;

pub use config::EdgarConfig;
pub use rate_limit::RateLimiter;
pub use response::parse_company_facts;

use response::CompanyTickerInfo;

/// SEC EDGAR data provider.
///
/// Every request, whether a ticker lookup or a facts download, goes through
/// the same [`RateLimiter`].
#[derive(Debug)]
pub struct EdgarProvider {
    client: reqwest::Client,
    rate_limiter: Mutex<RateLimiter>,
    config: EdgarConfig,
}

impl EdgarProvider {
    /// Create a new EDGAR provider from a configuration.
    ///
    /// # Errors
    /// Returns `DataError::Network` if the HTTP client cannot be built.
    pub fn new(config: EdgarConfig) -> Result<Self> {
        let rate_limiter = RateLimiter::new(config.min_interval);
        Self::with_rate_limiter(config, rate_limiter)
    }

    /// Create a new EDGAR provider that uses an existing rate limiter.
    ///
    /// # Errors
    /// Returns `DataError::Network` if the HTTP client cannot be built.
    pub fn with_rate_limiter(config: EdgarConfig, rate_limiter: RateLimiter) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config, rate_limiter))
    }

    /// Create a new EDGAR provider with a custom HTTP client.
    ///
    /// The client is used as-is; `config.user_agent` and `config.timeout`
    /// are not applied to it.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        config: EdgarConfig,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            client,
            rate_limiter: Mutex::new(rate_limiter),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Rate-limited GET returning the raw body.
    ///
    /// Connection failures, timeouts and non-success statuses are errors.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(body.to_vec())
    }
}

impl DataProvider for EdgarProvider {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    fn description(&self) -> &str {
        "SEC EDGAR company identities and XBRL company facts"
    }
}

#[async_trait]
impl IdentityProvider for EdgarProvider {
    async fn company_identity(&self, symbol: &Symbol) -> Result<Option<CompanyIdentity>> {
        if symbol.is_empty() {
            return Err(DataError::InvalidParameter("Empty ticker".to_string()));
        }

        debug!(symbol = %symbol, "Fetching company tickers from SEC");
        let body = self.get_bytes(&self.config.tickers_url).await?;

        let tickers: HashMap<String, CompanyTickerInfo> = serde_json::from_slice(&body)
            .map_err(|e| DataError::Parse(format!("Failed to parse company tickers: {}", e)))?;

        let identity = response::find_company(&tickers, symbol);
        match &identity {
            Some(company) => debug!(symbol = %symbol, cik = %company.cik, "Found CIK"),
            None => info!(symbol = %symbol, "No company matches ticker"),
        }

        Ok(identity)
    }
}

#[async_trait]
impl FactSource for EdgarProvider {
    async fn company_facts(&self, cik: &str) -> Result<CompanyFacts> {
        if cik.is_empty() {
            return Err(DataError::InvalidParameter("Empty CIK".to_string()));
        }

        let cik_padded = quarters_core::types::pad_cik(cik);
        let url = self.config.company_facts_url(&cik_padded);

        debug!(cik = %cik_padded, "Fetching company facts");
        let body = self.get_bytes(&url).await?;
        let facts = response::parse_company_facts(&body, &cik_padded);
        debug!(cik = %cik_padded, facts = facts.fact_count(), "Parsed company facts");

        Ok(facts)
    }
}
