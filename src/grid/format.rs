//! Cell formatter registry.
//!
//! A column's declared type selects a formatter; the value decides what the
//! formatter can do with it. Declared type and value may disagree for one
//! render while a column changes type, so every formatter accepts every
//! value variant and degrades to an empty render instead of failing.

use crate::constants::NULL_PLACEHOLDER;
use crate::types::{CellValue, ColumnType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Rendering rule attached to a column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormatter {
    /// Synthetic row-number column: plain digits, no grouping
    RowNumber,
    Text,
    Number,
    Datetime,
}

/// Output of a formatter
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedCell {
    /// The null placeholder
    Null,
    /// Formatted content with its style class
    Value { class: String, text: String },
    /// Nothing at all (type/value mismatch)
    Empty,
}

impl RenderedCell {
    fn value(class: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Value {
            class: class.into(),
            text: text.into(),
        }
    }

    /// Text a painter would draw, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Null => Some(NULL_PLACEHOLDER),
            Self::Value { text, .. } => Some(text),
            Self::Empty => None,
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Null => Some("cell-null"),
            Self::Value { class, .. } => Some(class),
            Self::Empty => None,
        }
    }
}

impl CellFormatter {
    /// Resolve the formatter for a declared column type. Unknown or missing
    /// types fall back to text.
    pub fn for_type(column_type: Option<ColumnType>) -> Self {
        match column_type {
            Some(ColumnType::Number) => Self::Number,
            Some(ColumnType::Datetime) => Self::Datetime,
            Some(ColumnType::Text) | None => Self::Text,
        }
    }

    /// Format a value. Never fails: null renders the placeholder under every
    /// formatter, mismatched values render empty.
    pub fn format(self, value: &CellValue) -> RenderedCell {
        if value.is_null() {
            return RenderedCell::Null;
        }

        match self {
            Self::RowNumber => format_row_number(value),
            Self::Text => match value {
                CellValue::Text(s) => RenderedCell::value("cell-text", s.as_str()),
                CellValue::Number(n) => RenderedCell::value("cell-text", plain_number(*n)),
                CellValue::Null => RenderedCell::Null,
            },
            Self::Number => {
                let number = match value {
                    CellValue::Number(n) => Some(*n),
                    CellValue::Text(s) => s.trim().parse::<f64>().ok(),
                    CellValue::Null => None,
                };
                match number {
                    Some(n) => RenderedCell::value("cell-number", format_number(n)),
                    None => RenderedCell::Empty,
                }
            }
            Self::Datetime => match value {
                CellValue::Text(s) => match format_datetime(s) {
                    Some(text) => RenderedCell::value("cell-datetime", text),
                    // Old formatter, new value: nobody sees this render.
                    None => RenderedCell::Empty,
                },
                _ => RenderedCell::Empty,
            },
        }
    }
}

fn format_row_number(value: &CellValue) -> RenderedCell {
    let text = match value {
        CellValue::Number(n) => plain_number(*n),
        CellValue::Text(s) => s.clone(),
        CellValue::Null => return RenderedCell::Null,
    };
    RenderedCell::value(format!("row-number row-number-{}", text.len()), text)
}

/// A number the way a plain string conversion writes it: integers without a
/// fractional part, everything else in shortest form.
fn plain_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Format a number with digit grouping and at most three fraction digits
/// (en-US conventions).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.3}", n);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0" after rounding away the fraction reads as zero
    let sign = if grouped == "0" && frac_part.is_empty() { "" } else { sign };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Parse an ISO-8601 timestamp (or bare date) as UTC
fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render an ISO-8601 timestamp with trailing all-zero time components
/// elided. The `Z` survives only when some time component remains.
///
/// `2020-01-01T00:00:00.000Z` -> `2020-01-01`,
/// `2020-01-01T13:30:00.000Z` -> `2020-01-01T13:30Z`.
pub fn format_datetime(value: &str) -> Option<String> {
    let iso = parse_iso(value)?.to_rfc3339_opts(SecondsFormat::Millis, true);

    let text = if let Some(date) = iso.strip_suffix("T00:00:00.000Z") {
        date.to_string()
    } else if let Some(minutes) = iso.strip_suffix(":00.000Z") {
        format!("{}Z", minutes)
    } else if let Some(seconds) = iso.strip_suffix(".000Z") {
        format!("{}Z", seconds)
    } else {
        iso
    };
    Some(text)
}
