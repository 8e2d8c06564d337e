use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CellValue, Dataset};
use crate::error::PlotError;

/// Largest magnitude kept as a number; bigger integers stay text so they do
/// not silently lose precision.
const MAX_SAFE_NUMBER: f64 = 9_007_199_254_740_992.0;

/// `None` only if the pattern failed to compile, in which case every
/// non-boolean cell is read as text.
static FLOAT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").ok()
});

fn looks_like_float(raw: &str) -> bool {
    FLOAT_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(raw))
}

/// One problem found while parsing, with positional context when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseIssue {
    pub line: Option<u64>,
    pub record: Option<u64>,
    pub message: String,
}

impl ParseIssue {
    fn at(position: Option<&csv::Position>, message: impl Into<String>) -> Self {
        Self {
            line: position.map(csv::Position::line),
            record: position.map(csv::Position::record),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Every issue found in one file. No partial dataset accompanies a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub file: String,
    pub issues: Vec<ParseIssue>,
}

impl From<ParseFailure> for PlotError {
    fn from(failure: ParseFailure) -> Self {
        Self::Parse {
            file: failure.file,
            issues: failure.issues,
        }
    }
}

/// Infers a typed cell from raw text.
///
/// `true`/`TRUE` and `false`/`FALSE` become booleans, float-looking text
/// becomes a number, the empty string becomes `Null`, anything else is text.
#[must_use]
pub fn infer_cell(raw: &str) -> CellValue {
    match raw {
        "" => CellValue::Null,
        "true" | "TRUE" => CellValue::Bool(true),
        "false" | "FALSE" => CellValue::Bool(false),
        _ if looks_like_float(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.abs() < MAX_SAFE_NUMBER => CellValue::Number(value),
            _ => CellValue::Text(raw.to_owned()),
        },
        _ => CellValue::Text(raw.to_owned()),
    }
}

/// Parses CSV bytes into a dataset named `file_name`.
///
/// The first row is the header, lines starting with `#` are comments, and
/// records whose fields are all blank are skipped. A record with a different
/// field count than the header is an issue; all issues are collected before
/// failing.
pub fn parse_csv(file_name: &str, bytes: &[u8]) -> Result<Dataset, ParseFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(bytes);

    let fail = |issues: Vec<ParseIssue>| ParseFailure {
        file: file_name.to_owned(),
        issues,
    };

    let header = match reader.headers() {
        Ok(record) if !record.is_empty() => unique_header(record.iter()),
        Ok(_) => return Err(fail(vec![ParseIssue::at(None, "file has no header row")])),
        Err(err) => {
            return Err(fail(vec![ParseIssue::at(
                err.position(),
                err.to_string(),
            )]));
        }
    };

    let mut issues = Vec::new();
    let mut rows = Vec::new();
    let mut skipped_blank = 0_usize;
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                issues.push(ParseIssue::at(err.position(), err.to_string()));
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            skipped_blank += 1;
            continue;
        }
        if record.len() != header.len() {
            let kind = if record.len() < header.len() {
                "too few"
            } else {
                "too many"
            };
            issues.push(ParseIssue::at(
                record.position(),
                format!(
                    "{kind} fields: expected {}, found {}",
                    header.len(),
                    record.len()
                ),
            ));
            continue;
        }
        rows.push(record.iter().map(infer_cell).collect::<Vec<_>>());
    }

    if !issues.is_empty() {
        warn!(file = file_name, issues = issues.len(), "failed to parse csv");
        return Err(fail(issues));
    }

    debug!(
        file = file_name,
        columns = header.len(),
        rows = rows.len(),
        skipped_blank,
        "parsed csv"
    );
    Ok(Dataset::from_rows(file_name, header, rows))
}

/// Renames repeated header names `name`, `name_1`, `name_2`, ...
fn unique_header<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut header = Vec::new();
    for name in names {
        let mut candidate = name.to_owned();
        while let Some(count) = seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{name}_{count}");
        }
        seen.insert(candidate.clone(), 0);
        header.push(candidate);
    }
    header
}
