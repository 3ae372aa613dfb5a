mod analyze;
mod compare;

use std::path::PathBuf;

use choosemypower::{analysis::AnalysisSettings, quantity::energy::KilowattHours};
use clap::{Parser, Subcommand, ValueEnum};

pub use self::{analyze::analyze, compare::compare};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Break down the costs of a single plan.
    #[clap(name = "analyze")]
    Analyze(Box<AnalyzeArgs>),

    /// Rank plans by their total cost.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Catalog ID of the plan.
    pub plan_id: String,

    #[clap(flatten)]
    pub catalog: CatalogArgs,

    #[clap(flatten)]
    pub settings: SettingsArgs,

    #[clap(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Catalog IDs of the plans, the whole catalog when omitted.
    pub plan_ids: Vec<String>,

    #[clap(flatten)]
    pub catalog: CatalogArgs,

    #[clap(flatten)]
    pub settings: SettingsArgs,

    #[clap(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Plan catalog in TOML.
    #[clap(long = "catalog", env = "PLAN_CATALOG_PATH", default_value = "plans.toml")]
    pub path: PathBuf,
}

#[derive(Copy, Clone, Parser)]
pub struct SettingsArgs {
    /// Average monthly usage in kilowatt-hours.
    #[clap(long = "monthly-usage-kwh", default_value = "1000", env = "MONTHLY_USAGE_KWH")]
    pub monthly_usage: KilowattHours,

    /// Analysis period in months.
    #[clap(long = "months", default_value = "12", env = "ANALYSIS_MONTHS")]
    pub n_months: u32,

    /// Ignore the promotional offers.
    #[clap(long)]
    pub skip_promotions: bool,

    /// Leave the one-time connection fee out.
    #[clap(long)]
    pub exclude_connection_fee: bool,

    /// Sales tax as a fraction, for example `0.0825`.
    #[clap(long, default_value = "0", env = "TAX_RATE")]
    pub tax_rate: f64,
}

impl From<SettingsArgs> for AnalysisSettings {
    fn from(args: SettingsArgs) -> Self {
        Self::builder()
            .monthly_usage(args.monthly_usage)
            .n_months(args.n_months)
            .apply_promotions(!args.skip_promotions)
            .include_connection_fee(!args.exclude_connection_fee)
            .tax_rate(args.tax_rate)
            .build()
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,

    /// Pretty-printed JSON.
    Json,
}
