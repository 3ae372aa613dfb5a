use choosemypower::{catalog::Catalog, comparison, prelude::*};

use crate::{
    cli::{CompareArgs, OutputFormat},
    tables::{build_comparison_table, build_insights_table},
};

#[instrument(skip_all, fields(n_requested = args.plan_ids.len()))]
pub fn compare(args: &CompareArgs) -> Result {
    let plans = Catalog::read_from(&args.catalog.path)?.select(&args.plan_ids)?;
    let comparison = comparison::compare(&plans, &args.settings.into())
        .context("try adding plans to the catalog or fixing their base rates")?;

    match args.format {
        OutputFormat::Table => {
            println!("{}", build_comparison_table(&comparison));
            println!("{}", build_insights_table(&comparison));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }

    Ok(())
}
