//! Report sinks for the aggregator.
//!
//! The text report mirrors the layout harness operators already read; the
//! JSON report is for scripts that provision the test-bed.
use crate::aggregate::ReportSink;
use crate::tally::{CaseVendorTally, TestbedVendorTally, MAX_VENDOR_DEVICE};
use crate::topology::{CaseRecord, DevicePair};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Human-readable report, written as each case is processed.
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn case(&mut self, record: &CaseRecord, tally: &CaseVendorTally) -> Result<()> {
        writeln!(self.out, "case {}:", record.case_id).context("write case report")?;
        writeln!(
            self.out,
            "\trole-vendor pair: {}",
            render_pairs(&record.devices)
        )
        .context("write case report")?;
        writeln!(
            self.out,
            "\tvendor devices  : {}",
            render_counts(tally.iter())
        )
        .context("write case report")?;
        Ok(())
    }

    fn not_found(&mut self, case_ids: &[String]) -> Result<()> {
        writeln!(self.out, "case {} not found", case_ids.join(", "))
            .context("write not-found report")
    }

    fn testbed(&mut self, tally: &TestbedVendorTally) -> Result<()> {
        writeln!(
            self.out,
            "\nTestbed needed vendor devices: {}",
            render_counts(tally.iter())
        )
        .context("write testbed report")?;
        self.out.flush().context("flush report")
    }
}

fn render_pairs(devices: &[DevicePair]) -> String {
    let pairs: Vec<String> = devices
        .iter()
        .map(|pair| format!("({}, {})", pair.role, pair.vendor))
        .collect();
    format!("[{}]", pairs.join(", "))
}

fn render_counts<'a>(counts: impl Iterator<Item = (&'a str, i64)>) -> String {
    let entries: Vec<String> = counts
        .map(|(vendor, count)| format!("{vendor}: {count}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

#[derive(Serialize)]
struct CaseSummary {
    case_id: String,
    devices: Vec<DevicePair>,
    vendors: CaseVendorTally,
}

#[derive(Serialize)]
struct TopologyReport<'a> {
    cases: &'a [CaseSummary],
    not_found: &'a [String],
    max_vendor_device: i64,
    testbed: &'a TestbedVendorTally,
}

/// Machine-readable report, written once the test-bed tally is final.
///
/// Nothing is written when the run aborts on a malformed line.
pub struct JsonReport<W: Write> {
    out: W,
    cases: Vec<CaseSummary>,
    not_found: Vec<String>,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cases: Vec::new(),
            not_found: Vec::new(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn case(&mut self, record: &CaseRecord, tally: &CaseVendorTally) -> Result<()> {
        self.cases.push(CaseSummary {
            case_id: record.case_id.clone(),
            devices: record.devices.clone(),
            vendors: tally.clone(),
        });
        Ok(())
    }

    fn not_found(&mut self, case_ids: &[String]) -> Result<()> {
        self.not_found = case_ids.to_vec();
        Ok(())
    }

    fn testbed(&mut self, tally: &TestbedVendorTally) -> Result<()> {
        let report = TopologyReport {
            cases: &self.cases,
            not_found: &self.not_found,
            max_vendor_device: MAX_VENDOR_DEVICE,
            testbed: tally,
        };
        let text = serde_json::to_string_pretty(&report).context("serialize topology report")?;
        writeln!(self.out, "{text}").context("write topology report")?;
        self.out.flush().context("flush report")
    }
}
