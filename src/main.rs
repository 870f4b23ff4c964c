use anyhow::{Context, Result, bail};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;

use imgpeek::{ImageFormat, ImageInfo, SniffOptions, Sniffer};

mod cli;

use cli::Cli;

#[derive(Serialize)]
struct Report<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<ImageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> Report<'a> {
    fn new(path: &'a Path, outcome: &Result<ImageInfo>) -> Self {
        match outcome {
            Ok(info) => Self {
                path,
                format: Some(info.format),
                width: Some(info.size.width),
                height: Some(info.size.height),
                error: None,
            },
            Err(err) => Self {
                path,
                format: None,
                width: None,
                height: None,
                error: Some(format!("{err:#}")),
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let sniffer = Sniffer::with_options(SniffOptions {
        strict_hint: cli.strict,
    });

    let outcomes: Vec<(&PathBuf, Result<ImageInfo>)> = cli
        .files
        .par_iter()
        .map(|path| (path, measure(&sniffer, &cli, path)))
        .collect();

    let mut failures = 0usize;
    for (path, outcome) in &outcomes {
        if outcome.is_err() {
            failures += 1;
        }
        if cli.json {
            println!("{}", serde_json::to_string(&Report::new(path, outcome))?);
        } else {
            print_line(path, outcome);
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) could not be measured", outcomes.len());
    }
    Ok(())
}

fn measure(sniffer: &Sniffer, cli: &Cli, path: &Path) -> Result<ImageInfo> {
    sniffer
        .inspect_path(path, cli.hint_for(path))
        .with_context(|| format!("Failed to read image size of {}", path.display()))
}

fn print_line(path: &Path, outcome: &Result<ImageInfo>) {
    match outcome {
        Ok(info) => println!("{}\t{}\t{}", path.display(), info.format, info.size),
        Err(err) => eprintln!("[!] {err:#}"),
    }
}

fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        Level::TRACE
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
