//! Vega-Lite JSON writer implementation
//!
//! Converts chart specs and their DataFrames into Vega-Lite JSON for
//! web-based interactive visualizations.
//!
//! # Mapping Strategy
//!
//! - View tree → `mark`/`encoding` at the top level, or `layer`, `hconcat`,
//!   `vconcat` composites
//! - Meta → `title`, `view` configuration
//! - Polars DataFrame → inline `data.values`, one object per row
//! - Container sizing → top-level `width: "container"` on single and
//!   layered views
//!
//! Selections use the Vega-Lite v4 `selection` syntax.
//!
//! # Example
//!
//! ```rust,ignore
//! use vegaplot::writer::{Writer, VegaLiteWriter};
//!
//! let writer = VegaLiteWriter::new();
//! let vega_json = writer.render(&chart)?;
//! // Can be rendered in browser with vega-embed
//! ```

use crate::plot::{ChartSpec, SizingPolicy};
use crate::writer::Writer;
use crate::{DataFrame, Result, VegaplotError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use polars::prelude::*;
use serde_json::{json, Map, Value};

/// Days from 0001-01-01 (CE) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Vega-Lite JSON writer
///
/// Generates Vega-Lite v4 specifications from chart specs and data.
pub struct VegaLiteWriter {
    /// Vega-Lite schema version
    schema: String,
}

impl VegaLiteWriter {
    /// Create a new Vega-Lite writer with default settings
    pub fn new() -> Self {
        Self {
            schema: "https://vega.github.io/schema/vega-lite/v4.json".to_string(),
        }
    }

    /// Build the Vega-Lite spec as a JSON value
    pub fn to_value(&self, spec: &ChartSpec, sizing: SizingPolicy) -> Result<Value> {
        self.validate(spec)?;

        let mut vl_spec = match serde_json::to_value(&spec.view) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(VegaplotError::WriterError(format!(
                    "View did not serialize to an object: {}",
                    other
                )))
            }
            Err(e) => {
                return Err(VegaplotError::WriterError(format!(
                    "Failed to serialize view: {}",
                    e
                )))
            }
        };

        vl_spec.insert("$schema".to_string(), json!(self.schema));

        if let Some(title) = &spec.meta.title {
            vl_spec.insert("title".to_string(), json!(title));
        }

        if let Some(view_config) = &spec.meta.view_config {
            vl_spec.insert("view".to_string(), view_config.clone());
        }

        if let Some(df) = &spec.meta.data {
            let values = self.dataframe_to_values(df)?;
            vl_spec.insert("data".to_string(), json!({ "values": values }));
        }

        // Concatenations size their children individually
        if sizing.use_container_width && !spec.view.is_concat() {
            vl_spec.insert("width".to_string(), json!("container"));
        }

        tracing::trace!(
            rows = ?spec.meta.data.as_ref().map(|df| df.height()),
            container_width = sizing.use_container_width,
            "Generated Vega-Lite spec"
        );

        Ok(Value::Object(vl_spec))
    }

    /// Convert Polars DataFrame to Vega-Lite data values (array of objects)
    fn dataframe_to_values(&self, df: &DataFrame) -> Result<Vec<Value>> {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| {
                let values = self.column_values(column.as_materialized_series())?;
                Ok((column.name().to_string(), values))
            })
            .collect::<Result<Vec<(String, Vec<Value>)>>>()?;

        let rows = (0..df.height())
            .map(|row_idx| {
                let row_obj: Map<String, Value> = columns
                    .iter()
                    .map(|(name, values)| {
                        let value = values.get(row_idx).cloned().unwrap_or(Value::Null);
                        (name.clone(), value)
                    })
                    .collect();
                Value::Object(row_obj)
            })
            .collect();

        Ok(rows)
    }

    /// Convert a whole series to JSON values
    ///
    /// Numbers and booleans stay native, temporal values become ISO strings,
    /// anything else is rendered through its string cast. Nulls (and
    /// non-finite floats) become JSON null.
    fn column_values(&self, series: &Series) -> Result<Vec<Value>> {
        use DataType::*;

        let values = match series.dtype() {
            Int8 | Int16 | Int32 | Int64 => cast(series, &Int64)?
                .i64()
                .map_err(|e| access_error("i64", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
            UInt8 | UInt16 | UInt32 | UInt64 => cast(series, &UInt64)?
                .u64()
                .map_err(|e| access_error("u64", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
            Float32 | Float64 => cast(series, &Float64)?
                .f64()
                .map_err(|e| access_error("f64", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
            Boolean => series
                .bool()
                .map_err(|e| access_error("bool", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
            String => series
                .str()
                .map_err(|e| access_error("string", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
            Date => {
                // Days since epoch → "YYYY-MM-DD"
                cast(series, &Int32)?
                    .i32()
                    .map_err(|e| access_error("date", e))?
                    .into_iter()
                    .map(|days| {
                        days.and_then(|d| d.checked_add(UNIX_EPOCH_DAYS_FROM_CE))
                            .and_then(NaiveDate::from_num_days_from_ce_opt)
                            .map_or(Value::Null, |date| {
                                json!(date.format("%Y-%m-%d").to_string())
                            })
                    })
                    .collect()
            }
            Datetime(time_unit, _) => {
                // Timestamp → "YYYY-MM-DDTHH:MM:SS.sssZ"
                let unit = *time_unit;
                cast(series, &Int64)?
                    .i64()
                    .map_err(|e| access_error("datetime", e))?
                    .into_iter()
                    .map(|ts| {
                        ts.and_then(|ts| timestamp_to_utc(ts, unit))
                            .map_or(Value::Null, |dt| {
                                json!(dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
                            })
                    })
                    .collect()
            }
            Time => {
                // Nanoseconds since midnight → "HH:MM:SS.sss"
                cast(series, &Int64)?
                    .i64()
                    .map_err(|e| access_error("time", e))?
                    .into_iter()
                    .map(|nanos| {
                        nanos
                            .and_then(|n| {
                                let secs = u32::try_from(n.div_euclid(1_000_000_000)).ok()?;
                                let frac = u32::try_from(n.rem_euclid(1_000_000_000)).ok()?;
                                NaiveTime::from_num_seconds_from_midnight_opt(secs, frac)
                            })
                            .map_or(Value::Null, |t| json!(t.format("%H:%M:%S%.3f").to_string()))
                    })
                    .collect()
            }
            _ => cast(series, &String)?
                .str()
                .map_err(|e| access_error("string", e))?
                .into_iter()
                .map(|v| v.map_or(Value::Null, |v| json!(v)))
                .collect(),
        };

        Ok(values)
    }
}

fn cast(series: &Series, dtype: &DataType) -> Result<Series> {
    series.cast(dtype).map_err(|e| {
        VegaplotError::WriterError(format!(
            "Failed to cast column '{}' to {}: {}",
            series.name(),
            dtype,
            e
        ))
    })
}

fn access_error(kind: &str, e: PolarsError) -> VegaplotError {
    VegaplotError::WriterError(format!("Failed to cast to {}: {}", kind, e))
}

/// Convert a physical timestamp in the given unit to a UTC datetime
fn timestamp_to_utc(timestamp: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let per_second: i64 = match unit {
        TimeUnit::Nanoseconds => 1_000_000_000,
        TimeUnit::Microseconds => 1_000_000,
        TimeUnit::Milliseconds => 1_000,
    };
    let secs = timestamp.div_euclid(per_second);
    let nanos = timestamp.rem_euclid(per_second) * (1_000_000_000 / per_second);
    DateTime::<Utc>::from_timestamp(secs, u32::try_from(nanos).ok()?)
}

impl Default for VegaLiteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for VegaLiteWriter {
    type Output = String;

    fn write(&self, spec: &ChartSpec, sizing: SizingPolicy) -> Result<Self::Output> {
        let vl_spec = self.to_value(spec, sizing)?;
        serde_json::to_string_pretty(&vl_spec).map_err(|e| {
            VegaplotError::WriterError(format!("Failed to serialize Vega-Lite JSON: {}", e))
        })
    }
}
