//! Single pass over a topology stream producing the test-bed vendor tally.
use crate::selection::Selection;
use crate::tally::{CaseVendorTally, TestbedVendorTally, ANY_VENDOR};
use crate::topology::{parse_record, CaseRecord, FormatError, LineKind, LineParser};
use anyhow::{Context, Result};
use std::io::BufRead;

/// Receives the report as the aggregator produces it.
pub trait ReportSink {
    /// Called once per processed case, in stream order.
    fn case(&mut self, record: &CaseRecord, tally: &CaseVendorTally) -> Result<()>;
    /// Called once after the stream when requested ids were never matched.
    fn not_found(&mut self, case_ids: &[String]) -> Result<()>;
    /// Called once with the finalized test-bed tally.
    fn testbed(&mut self, tally: &TestbedVendorTally) -> Result<()>;
}

/// Find the line-level parse failure behind an aggregation error, if any.
pub fn format_error(err: &anyhow::Error) -> Option<&FormatError> {
    err.chain().find_map(|cause| cause.downcast_ref::<FormatError>())
}

pub struct TopologyAggregator<'a> {
    source_label: String,
    selection: Selection,
    parser: LineParser,
    sink: &'a mut dyn ReportSink,
}

impl<'a> TopologyAggregator<'a> {
    /// `source_label` names the input in error context (usually its path).
    pub fn new(
        source_label: impl Into<String>,
        selection: Selection,
        sink: &'a mut dyn ReportSink,
    ) -> Result<Self> {
        Ok(Self {
            source_label: source_label.into(),
            selection,
            parser: LineParser::new()?,
            sink,
        })
    }

    /// Consume `reader` line by line and return the finalized tally.
    ///
    /// Stops at the first malformed line; nothing after it is tallied and
    /// the sink never sees a test-bed tally.
    pub fn run<R: BufRead>(mut self, reader: R) -> Result<TestbedVendorTally> {
        let mut testbed = TestbedVendorTally::new();
        let mut processed = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line.with_context(|| {
                format!("read line {line_number} of {}", self.source_label)
            })?;

            let next = match self.next_record(line_number, &line) {
                Ok(next) => next,
                Err(err) => {
                    tracing::debug!(
                        line_number = err.line_number(),
                        line = err.line(),
                        "unrecognized format"
                    );
                    return Err(err).with_context(|| format!("parse {}", self.source_label));
                }
            };
            let Some(record) = next else {
                continue;
            };

            // Fresh per case; nothing carries over between records.
            let case_tally = CaseVendorTally::from_devices(&record.devices);
            tracing::debug!(
                line_number,
                case_id = %record.case_id,
                devices = record.devices.len(),
                "case processed"
            );
            self.sink.case(&record, &case_tally)?;
            testbed.fold(&case_tally);
            processed += 1;
        }

        let unmatched = self.selection.remaining();
        if !unmatched.is_empty() {
            tracing::warn!(cases = ?unmatched, "requested cases not found");
            self.sink.not_found(unmatched)?;
        }

        testbed.finalize_any();
        if let Some(count_any) = testbed.get(ANY_VENDOR).filter(|count| *count < 0) {
            tracing::warn!(count_any, "known vendors exceed test-bed capacity");
        }
        tracing::info!(
            source = %self.source_label,
            cases = processed,
            vendors = testbed.iter().count(),
            "topology aggregated"
        );
        self.sink.testbed(&testbed)?;
        Ok(testbed)
    }

    /// Classify one line and parse it when it is a selected case record.
    fn next_record(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Result<Option<CaseRecord>, FormatError> {
        let line = line.trim();
        let (case_id, devices) = match self.parser.classify(line_number, line)? {
            LineKind::Blank | LineKind::Comment => return Ok(None),
            LineKind::Record { case_id, devices } => (case_id, devices),
        };
        if !self.selection.take(case_id) {
            tracing::debug!(line_number, case_id, "skipping unselected case");
            return Ok(None);
        }
        parse_record(line_number, line, case_id, devices).map(Some)
    }
}
