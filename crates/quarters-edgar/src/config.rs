//! Client configuration.

use std::time::Duration;

use crate::rate_limit::DEFAULT_MIN_INTERVAL;

/// SEC EDGAR API base URL
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Contact used when none is configured.
pub const DEFAULT_CONTACT: &str = "contact@example.com";

/// Settings for [`EdgarProvider`](crate::EdgarProvider).
///
/// The SEC requires a User-Agent that identifies the caller, in the form
/// "AppName/Version (contact@email.com)".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Minimum interval between requests.
    pub min_interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// URL of the ticker to CIK mapping.
    pub tickers_url: String,
    /// Base URL for the XBRL API.
    pub base_url: String,
}

impl EdgarConfig {
    /// Creates a configuration with the given User-Agent and defaults elsewhere.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Builds the User-Agent from a contact email.
    #[must_use]
    pub fn with_contact_email(mut self, email: &str) -> Self {
        self.user_agent = user_agent_for(email);
        self
    }

    /// Sets the minimum interval between requests.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the ticker mapping URL.
    #[must_use]
    pub fn with_tickers_url(mut self, url: impl Into<String>) -> Self {
        self.tickers_url = url.into();
        self
    }

    /// Overrides the XBRL API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the company facts document for a zero-padded CIK.
    #[must_use]
    pub fn company_facts_url(&self, cik: &str) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{}.json", self.base_url, cik)
    }
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: user_agent_for(DEFAULT_CONTACT),
            min_interval: DEFAULT_MIN_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            tickers_url: COMPANY_TICKERS_URL.to_string(),
            base_url: EDGAR_BASE_URL.to_string(),
        }
    }
}

fn user_agent_for(email: &str) -> String {
    format!("quarters/{} ({})", env!("CARGO_PKG_VERSION"), email)
}
