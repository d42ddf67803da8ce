//! Topology file line grammar.
//!
//! Each meaningful line maps a case id to the devices it needs:
//! `<case-id>-<role>:<vendor>,<role>:<vendor>,...`. Blank lines and lines
//! whose first non-space character is `#` carry no data.
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;

const COMMENT_PATTERN: &str = r"^\s*#";
// Non-greedy case id so the split happens on the first `-`.
const RECORD_PATTERN: &str = r"^(?P<case>.*?)-(?P<devices>.*)$";

/// One device position in a case and the vendor that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevicePair {
    pub role: String,
    pub vendor: String,
}

/// A parsed case line: the case id and its devices in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub case_id: String,
    pub devices: Vec<DevicePair>,
}

/// Classification of a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// Case id and the unparsed `role:vendor,...` remainder.
    Record { case_id: &'a str, devices: &'a str },
}

/// A line that does not follow the case-record grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    MissingSeparator {
        line_number: usize,
        line: String,
    },
    MalformedDevicePair {
        line_number: usize,
        line: String,
        token: String,
    },
}

impl FormatError {
    pub fn line_number(&self) -> usize {
        match self {
            FormatError::MissingSeparator { line_number, .. }
            | FormatError::MalformedDevicePair { line_number, .. } => *line_number,
        }
    }

    pub fn line(&self) -> &str {
        match self {
            FormatError::MissingSeparator { line, .. }
            | FormatError::MalformedDevicePair { line, .. } => line,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingSeparator { line_number, line } => write!(
                f,
                "unrecognized format at line {line_number}: {line}\nexpected `<case-id>-<role>:<vendor>,...`"
            ),
            FormatError::MalformedDevicePair {
                line_number,
                line,
                token,
            } => write!(
                f,
                "unrecognized format at line {line_number}: {line}\ndevice pair `{token}` is not `<role>:<vendor>`"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// Compiled line patterns, built once per run.
#[derive(Debug)]
pub struct LineParser {
    comment: Regex,
    record: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            comment: Regex::new(COMMENT_PATTERN).context("compile comment pattern")?,
            record: Regex::new(RECORD_PATTERN).context("compile case record pattern")?,
        })
    }

    /// Classify a raw line. Surrounding whitespace is ignored.
    pub fn classify<'a>(
        &self,
        line_number: usize,
        raw: &'a str,
    ) -> Result<LineKind<'a>, FormatError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(LineKind::Blank);
        }
        if self.comment.is_match(line) {
            return Ok(LineKind::Comment);
        }
        let captures = self
            .record
            .captures(line)
            .ok_or_else(|| FormatError::MissingSeparator {
                line_number,
                line: line.to_string(),
            })?;
        match (captures.name("case"), captures.name("devices")) {
            (Some(case_id), Some(devices)) => Ok(LineKind::Record {
                case_id: case_id.as_str(),
                devices: devices.as_str(),
            }),
            _ => Err(FormatError::MissingSeparator {
                line_number,
                line: line.to_string(),
            }),
        }
    }
}

/// Tokenize the `role:vendor,...` remainder of a record line.
///
/// Every comma-separated token must split on `:` into exactly two parts.
pub fn parse_devices(
    line_number: usize,
    line: &str,
    devices: &str,
) -> Result<Vec<DevicePair>, FormatError> {
    devices
        .split(',')
        .map(|token| {
            let mut parts = token.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(role), Some(vendor), None) => Ok(DevicePair {
                    role: role.to_string(),
                    vendor: vendor.to_string(),
                }),
                _ => Err(FormatError::MalformedDevicePair {
                    line_number,
                    line: line.to_string(),
                    token: token.to_string(),
                }),
            }
        })
        .collect()
}

/// Build a `CaseRecord` from an already classified record line.
pub fn parse_record(
    line_number: usize,
    line: &str,
    case_id: &str,
    devices: &str,
) -> Result<CaseRecord, FormatError> {
    Ok(CaseRecord {
        case_id: case_id.to_string(),
        devices: parse_devices(line_number, line, devices)?,
    })
}
