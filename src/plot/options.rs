//! Chart options shared across chart families
//!
//! Small enums for stacking, binning, legend placement and pan/zoom modes,
//! each mapping onto the corresponding Vega-Lite JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::encoding::ChannelArg;

// =============================================================================
// Cosmetic Options
// =============================================================================

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendOrient {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl LegendOrient {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendOrient::Top => "top",
            LegendOrient::Bottom => "bottom",
            LegendOrient::Left => "left",
            LegendOrient::Right => "right",
            LegendOrient::TopLeft => "top-left",
            LegendOrient::TopRight => "top-right",
            LegendOrient::BottomLeft => "bottom-left",
            LegendOrient::BottomRight => "bottom-right",
        }
    }
}

/// Vega-Lite legend object for an optional placement
///
/// No placement disables the legend.
pub fn legend_value(legend: Option<LegendOrient>) -> Value {
    match legend {
        Some(orient) => json!({"orient": orient.as_str()}),
        None => json!({"disable": true}),
    }
}

/// How a chart can be panned and zoomed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanZoom {
    /// Drag to pan, scroll to zoom
    Both,
    /// Drag to pan
    Pan,
    /// Scroll to zoom
    Zoom,
    /// Drag a brush on a miniature copy of the chart
    Minimap,
    /// Static chart
    #[serde(rename = "none")]
    Off,
}

/// Options every chart family accepts
///
/// Deserializable so chart configuration can be loaded from JSON; missing
/// keys take the line-chart defaults. A `null` legend disables the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Chart width in pixels; overridden by `use_container_width`
    pub width: Option<u32>,
    /// Chart height in pixels
    pub height: Option<u32>,
    pub title: Option<String>,
    /// Legend placement, `None` hides the legend
    pub legend: Option<LegendOrient>,
    pub pan_zoom: PanZoom,
    /// Stretch the chart to the width of its container
    pub use_container_width: bool,
}

impl ChartOptions {
    /// Options with family-specific defaults and no size or title
    pub fn new(legend: Option<LegendOrient>, pan_zoom: PanZoom, use_container_width: bool) -> Self {
        Self {
            width: None,
            height: None,
            title: None,
            legend,
            pan_zoom,
            use_container_width,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::new(Some(LegendOrient::Bottom), PanZoom::Both, true)
    }
}

// =============================================================================
// Chart-Specific Options
// =============================================================================

/// Stacking of the value axis
///
/// `true` stacks from a zero baseline, `false` disables stacking, any string
/// is a Vega-Lite stack mode (`"normalize"`, `"center"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stack {
    Flag(bool),
    Mode(String),
}

impl Stack {
    pub fn to_json(&self) -> Value {
        match self {
            Stack::Flag(true) => json!("zero"),
            Stack::Flag(false) => Value::Null,
            Stack::Mode(mode) => json!(mode),
        }
    }
}

impl Default for Stack {
    fn default() -> Self {
        Stack::Flag(true)
    }
}

impl From<bool> for Stack {
    fn from(flag: bool) -> Self {
        Stack::Flag(flag)
    }
}

impl From<&str> for Stack {
    fn from(mode: &str) -> Self {
        Stack::Mode(mode.to_string())
    }
}

/// Binning of a histogram axis
///
/// `true` uses the renderer's default binning, `false` disables it, and an
/// object carries explicit bin parameters such as `{"maxbins": 20}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinArg {
    Flag(bool),
    Params(Map<String, Value>),
}

impl BinArg {
    pub fn to_json(&self) -> Value {
        match self {
            BinArg::Flag(flag) => json!(flag),
            BinArg::Params(params) => Value::Object(params.clone()),
        }
    }

    /// Bin parameters with an explicit maximum bin count
    pub fn max_bins(count: u32) -> Self {
        let mut params = Map::new();
        params.insert("maxbins".to_string(), json!(count));
        BinArg::Params(params)
    }
}

impl Default for BinArg {
    fn default() -> Self {
        BinArg::Flag(true)
    }
}

impl From<bool> for BinArg {
    fn from(flag: bool) -> Self {
        BinArg::Flag(flag)
    }
}

/// Bar orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// Bar grouping
#[derive(Debug, Clone, PartialEq)]
pub enum GroupArg {
    /// Group bars by series; requires several value columns
    Series,
    /// Group bars by a column (or custom facet encoding)
    By(ChannelArg),
}

impl From<&str> for GroupArg {
    fn from(name: &str) -> Self {
        GroupArg::By(ChannelArg::from(name))
    }
}

/// Where a minimap is placed relative to the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimapLocation {
    Top,
    Bottom,
    Right,
}

// =============================================================================
// Annotations
// =============================================================================

/// A marker line at a fixed data coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub coord: Value,
    pub label: String,
}

impl Annotation {
    /// Unlabeled marker
    pub fn at(coord: impl Into<Value>) -> Self {
        Self {
            coord: coord.into(),
            label: String::new(),
        }
    }

    pub fn labeled(coord: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            coord: coord.into(),
            label: label.into(),
        }
    }

    /// Tooltip text: the label followed by the coordinate in parentheses
    pub fn tooltip(&self) -> String {
        let coord = match &self.coord {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if self.label.is_empty() {
            format!("({})", coord)
        } else {
            format!("{} ({})", self.label, coord)
        }
    }
}

/// Marker lines along both axes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub x: Vec<Annotation>,
    pub y: Vec<Annotation>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }
}
