//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use quarters::{PeriodType, Scale};

#[derive(Debug, Parser)]
#[command(name = "quarters")]
#[command(about = "Quarterly income statements from SEC XBRL company facts", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Stock ticker, e.g. AAPL
    #[arg(required = true)]
    pub(crate) ticker: Option<String>,

    /// Divide amounts by this much for display
    #[arg(long, value_enum, default_value_t = ScaleArg::Units)]
    pub(crate) scale: ScaleArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,

    #[command(flatten)]
    pub(crate) global: GlobalArgs,
}

#[derive(Debug, Args)]
pub(crate) struct GlobalArgs {
    /// Contact address sent in the User-Agent, as the SEC requires
    #[arg(long, env = "QUARTERS_EMAIL", global = true)]
    pub(crate) email: Option<String>,

    /// Minimum milliseconds between requests
    #[arg(long, env = "QUARTERS_RATE_LIMIT_MS", default_value = "100", global = true)]
    pub(crate) rate_limit_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub(crate) timeout_secs: u64,

    /// Download the facts document for every line item instead of once
    #[arg(long, global = true)]
    pub(crate) no_cache: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Latest 10-K values for the income statement, balance sheet and cash flow
    Snapshot {
        /// Stock ticker
        ticker: String,
    },

    /// One period of one concept
    Lookup {
        /// Stock ticker
        ticker: String,

        /// US-GAAP concept tag, e.g. NetIncomeLoss
        concept: String,

        /// Annual (10-K) or quarterly (10-Q) filings
        #[arg(long, value_enum, default_value_t = PeriodArg::Annual)]
        period: PeriodArg,

        /// Periods back from the most recent
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Fallback concept tag, tried in order (repeatable)
        #[arg(long = "alt")]
        alternatives: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum ScaleArg {
    Units,
    Thousands,
    Millions,
}

impl From<ScaleArg> for Scale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Units => Self::Units,
            ScaleArg::Thousands => Self::Thousands,
            ScaleArg::Millions => Self::Millions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PeriodArg {
    Annual,
    Quarterly,
}

impl From<PeriodArg> for PeriodType {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Annual => Self::Annual,
            PeriodArg::Quarterly => Self::Quarterly,
        }
    }
}
