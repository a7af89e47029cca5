//! Wide to long reshaping
//!
//! Series charts accept several value columns at once (`y = ["b", "c"]`).
//! Vega-Lite draws multiple series from long-format data, so such tables are
//! melted: every (row, series column) pair becomes one row carrying the id
//! columns, the series column's name and its value. The generated column
//! names are reserved (see [`crate::naming`]).

use crate::encoding::{normalize, opts, split_type_suffix, ChannelArg, Encoding, SeriesArg};
use crate::naming::{is_reserved_column, SERIES_NAME_COLUMN, SERIES_VALUE_COLUMN};
use crate::{DataFrame, Result, VegaplotError};
use polars::prelude::*;
use serde_json::Value;

/// Outcome of [`reshape`]
#[derive(Debug, Clone)]
pub struct Reshaped {
    /// Whether a long-format table was generated
    pub reshaped: bool,
    /// Data to build the chart from (the input itself when not reshaped)
    pub data: DataFrame,
    /// Encoding of the value axis
    pub value: Encoding,
    /// Encoding of the series-name column, only set when reshaped
    pub series: Option<Encoding>,
}

/// Reshape wide data into long format when several series are requested
///
/// `axis` is the domain channel (its column is kept on every output row);
/// `keep` lists other channels whose columns must survive the reshape, such
/// as color, size or opacity. Channels that do not name an existing column are
/// ignored.
///
/// # Errors
///
/// - `NameCollision` if the input already has a reserved column
/// - `ConfigurationError` if an empty series list is passed
/// - `DataError` if a series column does not exist
pub fn reshape(
    df: &DataFrame,
    axis: Option<&ChannelArg>,
    series: &SeriesArg,
    legend: &Value,
    keep: &[Option<&ChannelArg>],
) -> Result<Reshaped> {
    let names = match series {
        SeriesArg::Single(arg) => return Ok(passthrough(df, arg)),
        SeriesArg::Many(names) if names.is_empty() => {
            return Err(VegaplotError::ConfigurationError(
                "At least one value column is required".to_string(),
            ))
        }
        SeriesArg::Many(names) if names.len() == 1 => {
            return Ok(passthrough(df, &ChannelArg::Field(names[0].clone())))
        }
        SeriesArg::Many(names) => names,
    };

    if let Some(reserved) = df
        .get_column_names()
        .into_iter()
        .find(|name| is_reserved_column(name.as_str()))
    {
        return Err(VegaplotError::NameCollision(reserved.to_string()));
    }

    let value_fields: Vec<&str> = names.iter().map(|n| split_type_suffix(n).0).collect();

    let mut id_columns: Vec<&str> = Vec::new();
    for arg in std::iter::once(axis).chain(keep.iter().copied()).flatten() {
        if let Some(name) = arg.column_name() {
            if has_column(df, name) && !id_columns.contains(&name) {
                id_columns.push(name);
            }
        }
    }

    tracing::debug!(
        id_columns = ?id_columns,
        value_columns = ?value_fields,
        rows = df.height(),
        "Reshaping wide data into long format"
    );

    let long = melt(df, &id_columns, &value_fields)?;

    let value = normalize(
        &long,
        &ChannelArg::Field(SERIES_VALUE_COLUMN.to_string()),
        opts([("title", Value::Null)]),
    );
    let series = Encoding::field(SERIES_NAME_COLUMN)
        .with("title", Value::Null)
        .with("legend", legend.clone());

    Ok(Reshaped {
        reshaped: true,
        data: long,
        value,
        series: Some(series),
    })
}

fn passthrough(df: &DataFrame, arg: &ChannelArg) -> Reshaped {
    Reshaped {
        reshaped: false,
        data: df.clone(),
        value: normalize(df, arg, Default::default()),
        series: None,
    }
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Stack one block per value column: id columns, series name, series value
fn melt(df: &DataFrame, id_columns: &[&str], value_fields: &[&str]) -> Result<DataFrame> {
    let value_columns = value_fields
        .iter()
        .map(|name| {
            df.column(name).map_err(|_| {
                VegaplotError::DataError(format!("Value column '{}' not found", name))
            })
        })
        .collect::<Result<Vec<&Column>>>()?;
    let value_dtype = common_dtype(value_columns.iter().map(|c| c.dtype()));

    let height = df.height();
    let mut long: Option<DataFrame> = None;

    for (name, column) in value_fields.iter().zip(value_columns) {
        let mut columns = id_columns
            .iter()
            .map(|id| df.column(id).cloned())
            .collect::<PolarsResult<Vec<Column>>>()
            .map_err(|e| VegaplotError::DataError(format!("Failed to select id columns: {}", e)))?;

        columns.push(Column::new(SERIES_NAME_COLUMN.into(), vec![*name; height]));
        let values = column.cast(&value_dtype).map_err(|e| {
            VegaplotError::DataError(format!("Failed to cast column '{}': {}", name, e))
        })?;
        columns.push(values.with_name(SERIES_VALUE_COLUMN.into()));

        let block = DataFrame::new(columns).map_err(|e| {
            VegaplotError::DataError(format!("Failed to build long-format block: {}", e))
        })?;

        match long.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&block).map_err(|e| {
                    VegaplotError::DataError(format!("Failed to stack long-format data: {}", e))
                })?;
            }
            None => long = Some(block),
        }
    }

    long.ok_or_else(|| VegaplotError::ConfigurationError("No value columns to reshape".into()))
}

/// Storage type shared by all value columns after reshaping
///
/// Identical dtypes are kept; mixed numeric columns widen to `Float64`;
/// anything else falls back to strings.
fn common_dtype<'a>(mut dtypes: impl Iterator<Item = &'a DataType>) -> DataType {
    let Some(first) = dtypes.next() else {
        return DataType::String;
    };
    let mut all_same = true;
    let mut all_numeric = is_numeric(first);
    for dtype in dtypes {
        all_same &= dtype == first;
        all_numeric &= is_numeric(dtype);
    }
    if all_same {
        first.clone()
    } else if all_numeric {
        DataType::Float64
    } else {
        DataType::String
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    use DataType::*;
    matches!(
        dtype,
        Int8 | Int16 | Int32 | Int64 | UInt8 | UInt16 | UInt32 | UInt64 | Float32 | Float64
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::FieldType;
    use serde_json::json;

    fn wide() -> DataFrame {
        df! {
            "a" => &[1, 2, 3],
            "b" => &[10, 20, 30],
            "c" => &[5, 15, 25],
            "w" => &[0.1, 0.2, 0.3],
        }
        .unwrap()
    }

    fn legend() -> Value {
        json!({"orient": "bottom"})
    }

    #[test]
    fn test_single_series_is_not_reshaped() {
        let df = wide();
        let result = reshape(&df, Some(&"a".into()), &SeriesArg::from(["b"]), &legend(), &[])
            .unwrap();
        assert!(!result.reshaped);
        assert!(result.data.equals(&df));
        assert_eq!(result.value.field.as_deref(), Some("b"));
        assert_eq!(result.series, None);
    }

    #[test]
    fn test_custom_value_is_not_reshaped() {
        let df = wide();
        let arg = ChannelArg::custom(json!({"field": "b", "aggregate": "sum"}));
        let result = reshape(&df, Some(&"a".into()), &arg.into(), &legend(), &[]).unwrap();
        assert!(!result.reshaped);
        assert_eq!(result.value.get("aggregate"), Some(&json!("sum")));
    }

    #[test]
    fn test_row_count_law() {
        let df = wide();
        let result = reshape(
            &df,
            Some(&"a".into()),
            &SeriesArg::from(["b", "c", "w"]),
            &legend(),
            &[],
        )
        .unwrap();
        assert!(result.reshaped);
        assert_eq!(result.data.height(), df.height() * 3);
        // Original table is untouched
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_long_format_layout() {
        let result = reshape(
            &wide(),
            Some(&"a".into()),
            &SeriesArg::from(["b", "c"]),
            &legend(),
            &[],
        )
        .unwrap();
        let data = &result.data;
        let names: Vec<&str> = data.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["a", SERIES_NAME_COLUMN, SERIES_VALUE_COLUMN]);

        let series: Vec<Option<&str>> = data
            .column(SERIES_NAME_COLUMN)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            series,
            vec![Some("b"), Some("b"), Some("b"), Some("c"), Some("c"), Some("c")]
        );
        let values: Vec<Option<i32>> = data
            .column(SERIES_VALUE_COLUMN)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            values,
            vec![Some(10), Some(20), Some(30), Some(5), Some(15), Some(25)]
        );
    }

    #[test]
    fn test_reshape_encodings() {
        let result = reshape(
            &wide(),
            Some(&"a".into()),
            &SeriesArg::from(["b", "c"]),
            &legend(),
            &[],
        )
        .unwrap();
        assert_eq!(
            json!(result.value),
            json!({"field": "value", "type": "quantitative", "title": null})
        );
        assert_eq!(
            json!(result.series.unwrap()),
            json!({"field": "variable", "title": null, "legend": {"orient": "bottom"}})
        );
    }

    #[test]
    fn test_mixed_numeric_values_widen() {
        let result = reshape(
            &wide(),
            Some(&"a".into()),
            &SeriesArg::from(["b", "w"]),
            &legend(),
            &[],
        )
        .unwrap();
        let dtype = result.data.column(SERIES_VALUE_COLUMN).unwrap().dtype().clone();
        assert_eq!(dtype, DataType::Float64);
        assert_eq!(result.value.field_type, Some(FieldType::Quantitative));
    }

    #[test]
    fn test_keeps_extra_columns_and_strips_axis_suffix() {
        let result = reshape(
            &wide(),
            Some(&"a:O".into()),
            &SeriesArg::from(["b", "c"]),
            &legend(),
            &[Some(&"w".into()), Some(&ChannelArg::from(0.5)), None, Some(&"nope".into())],
        )
        .unwrap();
        let names: Vec<&str> = result
            .data
            .get_column_names()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(names, vec!["a", "w", SERIES_NAME_COLUMN, SERIES_VALUE_COLUMN]);
    }

    #[test]
    fn test_name_collision() {
        let df = df! {
            "a" => &[1, 2],
            "variable" => &[3, 4],
            "c" => &[5, 6],
        }
        .unwrap();
        let result = reshape(
            &df,
            Some(&"a".into()),
            &SeriesArg::from(["variable", "c"]),
            &legend(),
            &[],
        );
        assert!(matches!(result, Err(VegaplotError::NameCollision(name)) if name == "variable"));

        let df = df! { "a" => &[1], "value" => &[2], "c" => &[3] }.unwrap();
        let result = reshape(&df, None, &SeriesArg::from(["a", "c"]), &legend(), &[]);
        assert!(matches!(result, Err(VegaplotError::NameCollision(name)) if name == "value"));
    }

    #[test]
    fn test_missing_series_column() {
        let result = reshape(
            &wide(),
            Some(&"a".into()),
            &SeriesArg::from(["b", "missing"]),
            &legend(),
            &[],
        );
        assert!(matches!(result, Err(VegaplotError::DataError(_))));
    }

    #[test]
    fn test_empty_series_list() {
        let result = reshape(&wide(), None, &SeriesArg::Many(vec![]), &legend(), &[]);
        assert!(matches!(result, Err(VegaplotError::ConfigurationError(_))));
    }
}
