//! CLI argument parsing for the topology planner.
//!
//! The CLI only selects the input file, the cases, and the report format;
//! all counting lives in the aggregator.
use crate::selection::{Selection, ALL_CASES};
use clap::Parser;
use std::path::PathBuf;

/// Where the certification harness keeps its topology file by default.
pub const DEFAULT_TOPO_FILE: &str =
    "C:/GRL/Thread1.1/Thread_Harness/TestScripts/TopologyConfig.txt";

#[derive(Parser, Debug)]
#[command(
    name = "topoplan",
    version,
    about = "Parse a topology config file and list vendor devices by case",
    after_help = "Examples:\n  topoplan -f TopologyConfig.txt -c 5.1.1\n  topoplan -f TopologyConfig.txt -c 5.1.1 5.2.1\n  topoplan -f TopologyConfig.txt --json\n\nSet TOPOPLAN_LOG (e.g. TOPOPLAN_LOG=topoplan=debug) for diagnostics on stderr."
)]
pub struct Args {
    /// Topology config file
    #[arg(short = 'f', long, value_name = "PATH", default_value = DEFAULT_TOPO_FILE)]
    pub topo_file: PathBuf,

    /// Test case list (e.g. 5.1.1 9.2.1, default: all)
    #[arg(
        short = 'c',
        long,
        value_name = "CASE",
        num_args = 1..,
        default_value = ALL_CASES
    )]
    pub case_list: Vec<String>,

    /// Emit a machine-readable JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn selection(&self) -> Selection {
        Selection::from_case_list(self.case_list.iter().cloned())
    }
}
