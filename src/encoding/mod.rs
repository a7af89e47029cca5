//! Encoding types
//!
//! This module defines the values that flow through channel resolution:
//! what the caller may pass for a channel ([`ChannelArg`], [`SeriesArg`]),
//! the semantic field types Vega-Lite understands ([`FieldType`]), and the
//! canonical encoding record produced by normalization ([`Encoding`]),
//! grouped per chart in [`Encodings`].

pub mod infer;
pub mod normalize;

pub use infer::{dtype_field_type, infer, split_type_suffix, Inferred};
pub use normalize::{normalize, normalize_opt, opts, ChannelOptions};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// =============================================================================
// Field Types
// =============================================================================

/// Semantic classification of an encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Nominal,
    Ordinal,
    Quantitative,
    Temporal,
    #[serde(rename = "geojson")]
    GeoJson,
}

impl FieldType {
    /// Map an Altair-style two-character shorthand suffix (`:Q`, `:O`, ...) to a type
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            ":Q" => Some(FieldType::Quantitative),
            ":O" => Some(FieldType::Ordinal),
            ":N" => Some(FieldType::Nominal),
            ":T" => Some(FieldType::Temporal),
            ":G" => Some(FieldType::GeoJson),
            _ => None,
        }
    }

    /// Parse the Vega-Lite name of a type
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "nominal" => Some(FieldType::Nominal),
            "ordinal" => Some(FieldType::Ordinal),
            "quantitative" => Some(FieldType::Quantitative),
            "temporal" => Some(FieldType::Temporal),
            "geojson" => Some(FieldType::GeoJson),
            _ => None,
        }
    }
}

// =============================================================================
// Channels
// =============================================================================

/// Visual channel an encoding is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Color,
    Size,
    Opacity,
    Theta,
    Column,
    Row,
    Tooltip,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Color => "color",
            Channel::Size => "size",
            Channel::Opacity => "opacity",
            Channel::Theta => "theta",
            Channel::Column => "column",
            Channel::Row => "row",
            Channel::Tooltip => "tooltip",
        }
    }
}

// =============================================================================
// Caller Arguments
// =============================================================================

/// What a caller may pass for a single channel
///
/// A `Field` is a shorthand string: a column name, a column name with a type
/// suffix (`"date:T"`), or, when no such column exists, a literal string value
/// such as `"green"`. Resolution happens during normalization, against the
/// dataset the chart is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelArg {
    /// Column name or shorthand string
    Field(String),
    /// Fully custom encoding object, trusted as-is
    Custom(Map<String, Value>),
    /// Literal number, boolean or null
    Literal(Value),
}

impl ChannelArg {
    /// Create a custom encoding argument from a JSON object
    ///
    /// Non-object values are treated as literals.
    pub fn custom(value: Value) -> Self {
        Self::from(value)
    }

    /// Column name this argument refers to, with any type suffix removed
    ///
    /// Custom objects refer to a column through their `field` key. Literals
    /// refer to none.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            ChannelArg::Field(name) => Some(split_type_suffix(name).0),
            ChannelArg::Custom(map) => map.get("field").and_then(Value::as_str),
            ChannelArg::Literal(_) => None,
        }
    }

    /// Whether this argument is the given bare string
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, ChannelArg::Field(f) if f == name)
    }
}

impl From<&str> for ChannelArg {
    fn from(name: &str) -> Self {
        ChannelArg::Field(name.to_string())
    }
}

impl From<String> for ChannelArg {
    fn from(name: String) -> Self {
        ChannelArg::Field(name)
    }
}

impl From<f64> for ChannelArg {
    fn from(value: f64) -> Self {
        ChannelArg::Literal(json!(value))
    }
}

impl From<i64> for ChannelArg {
    fn from(value: i64) -> Self {
        ChannelArg::Literal(json!(value))
    }
}

impl From<i32> for ChannelArg {
    fn from(value: i32) -> Self {
        ChannelArg::Literal(json!(value))
    }
}

impl From<bool> for ChannelArg {
    fn from(value: bool) -> Self {
        ChannelArg::Literal(json!(value))
    }
}

impl From<Map<String, Value>> for ChannelArg {
    fn from(map: Map<String, Value>) -> Self {
        ChannelArg::Custom(map)
    }
}

impl From<Value> for ChannelArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ChannelArg::Field(s),
            Value::Object(map) => ChannelArg::Custom(map),
            other => ChannelArg::Literal(other),
        }
    }
}

/// What a caller may pass for the value axis of a series chart
///
/// `Many` names several wide-format columns that are drawn as separate
/// series; the data is reshaped into long format when it names two or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesArg {
    Many(Vec<String>),
    Single(ChannelArg),
}

impl From<ChannelArg> for SeriesArg {
    fn from(arg: ChannelArg) -> Self {
        SeriesArg::Single(arg)
    }
}

impl From<&str> for SeriesArg {
    fn from(name: &str) -> Self {
        SeriesArg::Single(ChannelArg::from(name))
    }
}

impl From<String> for SeriesArg {
    fn from(name: String) -> Self {
        SeriesArg::Single(ChannelArg::from(name))
    }
}

impl From<Map<String, Value>> for SeriesArg {
    fn from(map: Map<String, Value>) -> Self {
        SeriesArg::Single(ChannelArg::Custom(map))
    }
}

impl From<Vec<String>> for SeriesArg {
    fn from(names: Vec<String>) -> Self {
        SeriesArg::Many(names)
    }
}

impl From<Vec<&str>> for SeriesArg {
    fn from(names: Vec<&str>) -> Self {
        SeriesArg::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SeriesArg {
    fn from(names: [&str; N]) -> Self {
        SeriesArg::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Canonical encoding record for one channel
///
/// `field`, `value` and `datum` are mutually exclusive once resolved, except
/// for custom encodings which are passed through untouched. Every other
/// channel modifier (`title`, `legend`, `scale`, `bin`, `aggregate`,
/// `stack`, `axis`, `timeUnit`, ...) lives in `props`. A modifier set to JSON
/// `null` is an explicit suppression and is serialized as such.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datum: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl Encoding {
    /// Encoding reading a column
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            ..Default::default()
        }
    }

    /// Encoding with a constant visual value
    pub fn literal(value: Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    /// Encoding positioned at a constant data coordinate
    pub fn datum(value: Value) -> Self {
        Self {
            datum: Some(value),
            ..Default::default()
        }
    }

    /// Encoding from a custom object, keys routed to their typed slots
    pub fn from_custom(map: Map<String, Value>) -> Self {
        let mut encoding = Self::default();
        for (key, value) in map {
            encoding.set(key, value);
        }
        encoding
    }

    /// Set the semantic type
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Set a modifier, builder style
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Set a key, routing `field`/`value`/`datum`/`type` into their typed slots
    ///
    /// Keys whose value does not fit the typed slot (a non-string `field`, an
    /// unknown `type`) are kept verbatim as modifiers.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let parsed_type = value.as_str().and_then(FieldType::parse);
        match key.as_str() {
            "field" if value.is_string() => self.field = value.as_str().map(str::to_string),
            "value" => self.value = Some(value),
            "datum" => self.datum = Some(value),
            "type" if value.is_null() => self.field_type = None,
            "type" if parsed_type.is_some() => self.field_type = parsed_type,
            _ => {
                self.props.insert(key, value);
            }
        }
    }

    /// Get a modifier
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Suppress the channel title (`title: null`)
    pub fn suppress_title(&mut self) {
        self.props.insert("title".to_string(), Value::Null);
    }

    /// Suppress title and axis chrome
    pub fn suppress_chrome(&mut self) {
        self.suppress_title();
        self.props.insert("axis".to_string(), Value::Null);
    }

    /// Make the scale domain follow a named interval selection
    ///
    /// Any existing scale properties are kept.
    pub fn link_domain(&mut self, selection: &str, channel: Channel) {
        let mut scale = match self.props.remove("scale") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        scale.insert(
            "domain".to_string(),
            json!({"selection": selection, "encoding": channel.as_str()}),
        );
        self.props.insert("scale".to_string(), Value::Object(scale));
    }
}

/// Encodings of one plot view, keyed by channel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encodings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Encoding>,
}

impl Encodings {
    pub fn get_mut(&mut self, channel: Channel) -> Option<&mut Encoding> {
        match channel {
            Channel::X => self.x.as_mut(),
            Channel::Y => self.y.as_mut(),
            Channel::Color => self.color.as_mut(),
            Channel::Size => self.size.as_mut(),
            Channel::Opacity => self.opacity.as_mut(),
            Channel::Theta => self.theta.as_mut(),
            Channel::Column => self.column.as_mut(),
            Channel::Row => self.row.as_mut(),
            Channel::Tooltip => self.tooltip.as_mut(),
        }
    }

    /// Swap the x/y encodings and the row/column facets as a block
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
        std::mem::swap(&mut self.row, &mut self.column);
    }
}
