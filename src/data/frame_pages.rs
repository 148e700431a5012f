//! Polars-backed page fetcher.
//!
//! Keeps a `DataFrame` and slices it per page, converting polars values to
//! grid cell values. Dates and datetimes are served as ISO-8601 strings so
//! the datetime formatter can parse them.

use crate::data::error::{DataError, DataResult};
use crate::data::source::PageFetcher;
use crate::types::{CellValue, ColumnType, Row};
use chrono::{DateTime, NaiveDate, SecondsFormat};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

pub struct FramePages {
    /// Column names and grid types, in frame order
    columns: Vec<(String, ColumnType)>,
    frame: Arc<DataFrame>,
}

impl FramePages {
    pub fn from_frame(frame: DataFrame) -> DataResult<Self> {
        let columns: Vec<(String, ColumnType)> = frame
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), column_type_of(col.dtype())))
            .collect();

        if columns.is_empty() {
            return Err(DataError::NoColumns);
        }

        Ok(Self {
            columns,
            frame: Arc::new(frame),
        })
    }

    /// Load a CSV (or TSV, by extension) file
    pub fn from_csv(path: &PathBuf) -> DataResult<Self> {
        let start = std::time::Instant::now();

        let separator = if path.extension().map(|e| e == "tsv").unwrap_or(false) {
            b'\t'
        } else {
            b','
        };

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(1000))
            .finish()?
            .collect()?;

        tracing::debug!(
            "Loaded CSV {} with {} rows x {} cols in {:?}",
            path.display(),
            df.height(),
            df.width(),
            start.elapsed()
        );

        Self::from_frame(df)
    }

    pub fn column_keys(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|(_, ty)| *ty).collect()
    }
}

impl PageFetcher for FramePages {
    fn total_rows(&self) -> usize {
        self.frame.height()
    }

    fn fetch_rows(&self, start: usize, count: usize) -> DataResult<Vec<Row>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let slice = self.frame.slice(start as i64, count);
        let mut rows = Vec::with_capacity(slice.height());

        for row_idx in 0..slice.height() {
            let mut row = Row::new();
            for (name, _) in &self.columns {
                let value = match slice.column(name) {
                    Ok(column) => polars_value_to_cell(column, row_idx),
                    Err(_) => CellValue::Null,
                };
                row.insert(name.clone(), value);
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

/// Map a polars dtype onto a grid column type
fn column_type_of(dtype: &polars::datatypes::DataType) -> ColumnType {
    match dtype {
        polars::datatypes::DataType::Int8
        | polars::datatypes::DataType::Int16
        | polars::datatypes::DataType::Int32
        | polars::datatypes::DataType::Int64
        | polars::datatypes::DataType::UInt8
        | polars::datatypes::DataType::UInt16
        | polars::datatypes::DataType::UInt32
        | polars::datatypes::DataType::UInt64
        | polars::datatypes::DataType::Float32
        | polars::datatypes::DataType::Float64 => ColumnType::Number,
        polars::datatypes::DataType::Date | polars::datatypes::DataType::Datetime(_, _) => {
            ColumnType::Datetime
        }
        _ => ColumnType::Text,
    }
}

/// Convert a polars cell value to a grid cell value
fn polars_value_to_cell(column: &Column, row_idx: usize) -> CellValue {
    let Ok(val) = column.get(row_idx) else {
        return CellValue::Null;
    };

    match val {
        AnyValue::Null => CellValue::Null,
        AnyValue::Int8(v) => CellValue::Number(v as f64),
        AnyValue::Int16(v) => CellValue::Number(v as f64),
        AnyValue::Int32(v) => CellValue::Number(v as f64),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(v as f64),
        AnyValue::UInt16(v) => CellValue::Number(v as f64),
        AnyValue::UInt32(v) => CellValue::Number(v as f64),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(v as f64),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::Boolean(v) => CellValue::Text(v.to_string()),
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => {
            let s_str: &str = &s;
            CellValue::Text(s_str.to_string())
        }
        AnyValue::Date(days) => date_to_iso(days).into(),
        AnyValue::Datetime(v, unit, _) => datetime_to_iso(v, unit).into(),
        other => CellValue::Text(format!("{}", other)),
    }
}

fn date_to_iso(days_since_epoch: i32) -> Option<String> {
    let days_from_ce = days_since_epoch.checked_add(UNIX_EPOCH_CE_DAYS)?;
    let date = NaiveDate::from_num_days_from_ce_opt(days_from_ce)?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn datetime_to_iso(value: i64, unit: TimeUnit) -> Option<String> {
    let (per_second, nanos_per_tick) = match unit {
        TimeUnit::Milliseconds => (1_000, 1_000_000),
        TimeUnit::Microseconds => (1_000_000, 1_000),
        TimeUnit::Nanoseconds => (1_000_000_000, 1),
    };
    let secs = value.div_euclid(per_second);
    let nanos = (value.rem_euclid(per_second) * nanos_per_tick) as u32;
    let dt = DateTime::from_timestamp(secs, nanos)?;
    Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
