//! Encoding normalization
//!
//! Turns any accepted shape of channel argument into a canonical [`Encoding`],
//! merging in channel options supplied by the chart builder (`title`,
//! `legend`, `bin`, `aggregate`, ...). Normalization never fails: every
//! argument shape has a well-defined encoding.

use super::infer::{infer, Inferred};
use super::{ChannelArg, Encoding};
use crate::DataFrame;
use serde_json::{Map, Value};

/// Channel-specific defaults merged into a normalized encoding
pub type ChannelOptions = Map<String, Value>;

/// Build channel options from key/value pairs
///
/// ```
/// use vegaplot::encoding::opts;
/// use serde_json::{json, Value};
///
/// let options = opts([("title", Value::Null), ("bin", json!(true))]);
/// assert_eq!(options.len(), 2);
/// ```
pub fn opts<const N: usize>(pairs: [(&str, Value); N]) -> ChannelOptions {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Normalize a channel argument into an encoding
///
/// - `Literal` → `{value, ...options}`
/// - `Field` → `{field, type, ...options}`, where the type comes from the
///   options if pinned there, otherwise from inference. A string that does
///   not name a column becomes `{value, ...options}`.
/// - `Custom` → the options act as defaults; the object's own keys win.
pub fn normalize(df: &DataFrame, arg: &ChannelArg, options: ChannelOptions) -> Encoding {
    match arg {
        ChannelArg::Literal(value) => apply(Encoding::literal(value.clone()), options),
        ChannelArg::Field(name) => {
            let base = if options.contains_key("type") {
                Encoding::field(name.as_str())
            } else {
                match infer(df, name) {
                    Inferred::Field { name, field_type } => Encoding {
                        field: Some(name),
                        field_type,
                        ..Default::default()
                    },
                    Inferred::Literal(value) => Encoding::literal(value),
                }
            };
            apply(base, options)
        }
        ChannelArg::Custom(custom) => {
            let mut encoding = apply(Encoding::default(), options);
            for (key, value) in custom {
                encoding.set(key.as_str(), value.clone());
            }
            encoding
        }
    }
}

/// Normalize an optional channel argument
///
/// An absent argument omits the channel entirely.
pub fn normalize_opt(
    df: &DataFrame,
    arg: Option<&ChannelArg>,
    options: ChannelOptions,
) -> Option<Encoding> {
    arg.map(|arg| normalize(df, arg, options))
}

fn apply(mut encoding: Encoding, options: ChannelOptions) -> Encoding {
    for (key, value) in options {
        encoding.set(key, value);
    }
    encoding
}
