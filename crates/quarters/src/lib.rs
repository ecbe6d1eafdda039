#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quarters/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Quarterly income statement reconstruction.
//!
//! The flow for each line item:
//!
//! 1. [`resolve`] picks the first concept tag the company reports under
//! 2. [`classify`] sorts every fact into annual, nine-month, quarterly or other
//! 3. [`synthesize`] derives fourth quarters from annual and nine-month totals
//! 4. [`PeriodAggregator`] merges the values into one record per quarter
//!
//! [`build`] then orders the records into a [`QuarterlyTable`], and
//! [`QuarterlyPipeline`] runs the whole thing against a data provider.
//!
//! # Features
//!
//! - `edgar` - SEC EDGAR provider and [`QuarterlyPipeline::edgar`]

// Core types and traits
pub use quarters_core::*;

// Cache implementations
pub use quarters_cache::{InMemoryCache, NoopCache};

// Providers
#[cfg(feature = "edgar")]
pub use quarters_edgar::{EdgarConfig, EdgarProvider, RateLimiter, parse_company_facts};

/// Per-quarter aggregation of classified facts.
pub mod aggregate;
/// Income statement line items.
pub mod line_items;
/// Single-period lookup.
pub mod lookup;
/// End-to-end pipeline.
pub mod pipeline;
/// Concept tag resolution.
pub mod resolver;
/// Latest annual values per statement.
pub mod snapshot;
/// Quarter margins.
pub mod summary;
/// Fourth quarter derivation.
pub mod synthesis;
/// Table building and export.
pub mod table;

pub use aggregate::{
    ClassifiedFacts, LineValue, Origin, PeriodAggregator, QuarterMap, QuarterRecord, aggregate,
};
pub use line_items::{INCOME_STATEMENT, LineItemSpec};
pub use lookup::{PeriodQuery, PeriodType, PeriodValue, find_period};
pub use pipeline::{QuarterlyPipeline, QuarterlyStatement};
pub use resolver::{resolve, resolve_in};
pub use snapshot::{AnnualSnapshot, SnapshotEntry, Statement};
pub use summary::QuarterSummary;
pub use synthesis::synthesize;
pub use table::{NOT_AVAILABLE, QuarterlyTable, Row, Scale, build};
