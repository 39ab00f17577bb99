use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use segment_history::cli::{run, Args, Collaborators};
use segment_history::{GoogleSheets, Settings, StravaClient};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::from_env().context("could not resolve working directory")?;
    let strava = StravaClient::new();
    let sheets = GoogleSheets::new();
    let deps = Collaborators {
        history: &strava,
        sheets: &sheets,
    };

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    run(&args, &settings, &deps, &mut input, &mut out)
}
