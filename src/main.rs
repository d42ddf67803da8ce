use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};

mod aggregate;
mod cli;
mod logging;
mod report;
mod selection;
mod tally;
mod topology;

use aggregate::{format_error, ReportSink, TopologyAggregator};
use report::{JsonReport, TextReport};

fn main() -> Result<()> {
    logging::init_tracing();
    let args = cli::Args::parse();
    run(&args).inspect_err(|err| {
        if let Some(format) = format_error(err) {
            tracing::error!(
                line_number = format.line_number(),
                line = format.line(),
                "rejected topology line"
            );
        }
    })
}

fn run(args: &cli::Args) -> Result<()> {
    let file = File::open(&args.topo_file)
        .with_context(|| format!("open topology file {}", args.topo_file.display()))?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let out = stdout.lock();
    let mut text;
    let mut json;
    let sink: &mut dyn ReportSink = if args.json {
        json = JsonReport::new(out);
        &mut json
    } else {
        text = TextReport::new(out);
        &mut text
    };

    let aggregator = TopologyAggregator::new(
        args.topo_file.display().to_string(),
        args.selection(),
        sink,
    )?;
    aggregator.run(reader)?;
    Ok(())
}
