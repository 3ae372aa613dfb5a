mod cli;
mod tables;

use choosemypower::prelude::*;
use clap::{Parser, crate_version};

use crate::cli::{Args, Command, analyze, compare};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Analyze(args) => analyze(&args)?,
        Command::Compare(args) => compare(&args)?,
    }

    info!("done!");
    Ok(())
}
