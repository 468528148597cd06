#![deny(clippy::all)]
use std::process::exit;
use std::sync::Arc;

use anyhow::Result;
use booru_common::Booru;
use booru_core::fetcher::MediaFetcher;
use booru_core::import::ImportSummary;
use booru_core::Importer;
use booru_importer::cli::Cli;
use booru_importer::config::{Config, Settings};
use booru_importer::logger::{init_fallback_logger, init_logger};
use booru_importer::progress_bars::IndicatifProgressHandler;
use booru_importer::upload::StagingUploader;
use clap::Parser;
use log::{error, warn};
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() {
    let args: Cli = Cli::parse();

    if let Err(err) = run(args).await {
        init_fallback_logger();
        error!("{err:#}");
        exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    init_logger(&config.logging)?;

    if args.query_has_single_quote() {
        warn!("Query contains a single quote. If the search misbehaves, wrap it in double quotes instead.");
    }

    let settings = Settings::derive(&config);

    let fetcher = MediaFetcher::with_default_client(settings.tmp_path.clone())?;
    let uploader = Arc::new(StagingUploader::new(
        settings.library_path.clone(),
        settings.tagging,
    ));
    let progress = Arc::new(IndicatifProgressHandler::new(settings.hide_progress));

    let mut importer = Importer::new(fetcher, uploader).with_progress(progress);

    for server in config.server_overrides() {
        importer = importer.with_server(server);
    }

    for booru in Booru::ALL {
        importer = importer.with_credentials(booru, config.credentials(booru));
    }

    let summary = importer.run(args.booru, &args.query).await;
    print_results(&summary);

    Ok(())
}

fn print_results(summary: &ImportSummary) {
    println!(
        "{} {} {}",
        summary.imported().to_string().bold().blue(),
        "posts".bold().blue(),
        "imported".bold()
    );

    if summary.skipped() > 0 {
        println!(
            "{} {}",
            summary.skipped().to_string().bold().yellow(),
            "posts were skipped.".bold().yellow()
        );
    }

    for report in summary.reports.iter().filter(|r| r.failure.is_some()) {
        println!(
            "{} {}",
            report.booru.pretty_name().bold().red(),
            "could not be searched.".bold().red()
        );
    }
}
