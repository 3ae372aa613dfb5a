use choosemypower::{analysis, catalog::Catalog, prelude::*};

use crate::{
    cli::{AnalyzeArgs, OutputFormat},
    tables::{build_breakdown_table, build_projection_table, print_notes},
};

#[instrument(skip_all, fields(plan_id = %args.plan_id))]
pub fn analyze(args: &AnalyzeArgs) -> Result {
    let catalog = Catalog::read_from(&args.catalog.path)?;
    let plan = catalog.find(&args.plan_id)?;
    let analysis = analysis::analyze(plan, &args.settings.into())?;

    match args.format {
        OutputFormat::Table => {
            println!("{} by {}", analysis.plan_name, analysis.provider);
            println!("{}", build_breakdown_table(&analysis));
            println!("{}", build_projection_table(&analysis));
            print_notes(&analysis);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }

    Ok(())
}
