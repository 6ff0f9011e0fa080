//! Table loader
//!
//! Reads one delimited source file and applies the normalization
//! policy column by column. Which rule applies is decided from the
//! original (trimmed) header spelling; the cleaned, prefixed name is
//! only assigned afterwards.

use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;

use super::errors::{ParseError, ParseResult};
use super::role::TableRole;
use super::table::{NormalizedTable, Row};

/// Header of the registration tail-number column. The source stores
/// tail numbers without their leading `N`.
const TAIL_NUMBER_HEADER: &str = "N-NUMBER";

/// Headers of the join-key columns. Some are numeric in the source but
/// act as opaque keys, so their values are forced to trimmed strings.
const JOIN_KEY_HEADERS: [&str; 3] = ["CODE", "MFR MDL CODE", "ENG MFR MDL"];

/// Date value shapes accepted by the loader.
const DATE_FORMATS: [&str; 3] = ["%Y%m%d", "%m/%d/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    TailNumber,
    JoinKey,
    Date,
    Plain,
}

struct ColumnSpec {
    raw_index: usize,
    name: String,
    kind: ColumnKind,
    /// Still true while every non-null value parses as an integer.
    int_candidate: bool,
    has_values: bool,
}

/// Load one source file as a `NormalizedTable` for the given role.
pub fn load_table(path: &Path, role: TableRole) -> ParseResult<NormalizedTable> {
    if !path.exists() {
        return Err(ParseError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ParseError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    let headers = reader
        .headers()
        .map_err(|e| ParseError::Header {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let mut specs = Vec::new();
    for (index, raw) in headers.iter().enumerate() {
        let trimmed = raw.trim();
        // Unnamed columns are parser padding, not data.
        if trimmed.is_empty() {
            continue;
        }
        let kind = classify(trimmed);
        specs.push(ColumnSpec {
            raw_index: index,
            name: format!("{}{}", role.prefix(), clean_header(trimmed)),
            kind,
            int_candidate: kind == ColumnKind::Plain,
            has_values: false,
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| ParseError::Record {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut row = Row::new();
        for spec in &mut specs {
            let raw_value = record.get(spec.raw_index).unwrap_or("").trim();
            let value = if raw_value.is_empty() {
                Value::Null
            } else {
                match spec.kind {
                    ColumnKind::TailNumber => Value::String(format!("N{}", raw_value)),
                    ColumnKind::JoinKey => Value::String(raw_value.to_string()),
                    ColumnKind::Date => match parse_date(raw_value) {
                        Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
                        None => Value::Null,
                    },
                    ColumnKind::Plain => {
                        spec.has_values = true;
                        if spec.int_candidate && raw_value.parse::<i64>().is_err() {
                            spec.int_candidate = false;
                        }
                        Value::String(raw_value.to_string())
                    }
                }
            };
            row.insert(spec.name.clone(), value);
        }
        rows.push(row);
    }

    // Second pass: columns whose every non-null value parsed as an
    // integer become typed numbers.
    for spec in &specs {
        if spec.kind != ColumnKind::Plain || !spec.int_candidate || !spec.has_values {
            continue;
        }
        for row in &mut rows {
            let parsed = match row.get(&spec.name) {
                Some(Value::String(s)) => s.parse::<i64>().ok(),
                _ => None,
            };
            if let Some(n) = parsed {
                row.insert(spec.name.clone(), Value::Number(n.into()));
            }
        }
    }

    let columns = specs.into_iter().map(|s| s.name).collect();
    Ok(NormalizedTable::from_parts(columns, rows))
}

fn classify(raw_header: &str) -> ColumnKind {
    if raw_header == TAIL_NUMBER_HEADER {
        ColumnKind::TailNumber
    } else if JOIN_KEY_HEADERS.contains(&raw_header) {
        ColumnKind::JoinKey
    } else if raw_header.to_uppercase().ends_with(" DATE") {
        ColumnKind::Date
    } else {
        ColumnKind::Plain
    }
}

/// Rewrite a header name: lowercase, spaces and `(` become `-`, `)` is
/// dropped.
fn clean_header(raw_header: &str) -> String {
    raw_header
        .to_lowercase()
        .replace(' ', "-")
        .replace('(', "-")
        .replace(')', "")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
