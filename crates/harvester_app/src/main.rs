mod cli;
mod settings;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_engine::{GameStore, Harvester, WooglesClient};
use log::LevelFilter;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(cli.log.into(), level, &cli.log_file);

    let settings = settings::resolve(&cli)?;
    let store = GameStore::open(&settings.database)?;
    let client = WooglesClient::new(settings.remote).context("failed to build http client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    engine_info!(
        "Harvesting games for {} into {:?}",
        settings.harvest.username,
        settings.database
    );
    let report = runtime
        .block_on(Harvester::new(&client, store, settings.harvest).run())
        .inspect_err(|err| engine_error!("Harvest aborted: {}", err))?;

    engine_info!(
        "Done at offset {}: {} stored ({} without transcript), {} already stored, {} filtered out, {} transcript failures, {} listing failures over {} pages",
        report.final_offset,
        report.stored,
        report.empty_transcripts,
        report.already_stored,
        report.rejected,
        report.transcript_failures,
        report.listing_failures,
        report.pages_fetched
    );
    if let Some(reason) = &report.last_listing_failure {
        engine_warn!("Last listing failure: {}", reason);
    }
    Ok(())
}
