//! Field type inference
//!
//! Guesses the semantic type of a channel's field, first from an explicit
//! shorthand suffix and then from the storage type of the matching column.
//! A name that is not a column of the dataset is not an error: it is a
//! literal value (`"green"`, `"#223344"`, `"42"`).

use super::FieldType;
use crate::DataFrame;
use polars::prelude::DataType;
use serde_json::Value;

/// Result of resolving a shorthand string against a dataset
#[derive(Debug, Clone, PartialEq)]
pub enum Inferred {
    /// Column reference with its resolved name and, if known, its type
    Field {
        name: String,
        field_type: Option<FieldType>,
    },
    /// The string did not name a column and is a literal value
    Literal(Value),
}

/// Split an Altair-style type suffix off a shorthand string
///
/// `"foo:Q"` becomes `("foo", Some(Quantitative))`. Strings of two characters
/// or fewer are never split.
pub fn split_type_suffix(name: &str) -> (&str, Option<FieldType>) {
    if name.len() > 2 && name.is_char_boundary(name.len() - 2) {
        let (prefix, suffix) = name.split_at(name.len() - 2);
        if let Some(field_type) = FieldType::from_suffix(suffix) {
            return (prefix, Some(field_type));
        }
    }
    (name, None)
}

/// Infer the semantic type of a polars dtype
///
/// Returns `None` for storage types without an obvious mapping (lists,
/// structs, binary, durations); the renderer then applies its own default.
pub fn dtype_field_type(dtype: &DataType) -> Option<FieldType> {
    use DataType::*;
    match dtype {
        String | Boolean | Categorical(..) | Enum(..) => Some(FieldType::Nominal),
        Int8 | Int16 | Int32 | Int64 | UInt8 | UInt16 | UInt32 | UInt64 | Float32 | Float64 => {
            Some(FieldType::Quantitative)
        }
        Date | Datetime(_, _) | Time => Some(FieldType::Temporal),
        _ => None,
    }
}

/// Resolve a shorthand string against a dataset
///
/// In priority order: a recognized type suffix wins outright, then a
/// missing column makes the string a literal, then the column's dtype
/// decides.
pub fn infer(df: &DataFrame, name: &str) -> Inferred {
    let (prefix, suffix_type) = split_type_suffix(name);
    if suffix_type.is_some() {
        return Inferred::Field {
            name: prefix.to_string(),
            field_type: suffix_type,
        };
    }

    match df.column(name) {
        Ok(column) => Inferred::Field {
            name: name.to_string(),
            field_type: dtype_field_type(column.dtype()),
        },
        Err(_) => Inferred::Literal(Value::String(name.to_string())),
    }
}
