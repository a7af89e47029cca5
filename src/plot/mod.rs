//! Chart specification types
//!
//! A [`ChartSpec`] is the object graph handed to a renderer. It splits into
//! [`Meta`] (the dataset, title and view configuration shared by the whole
//! chart) and a [`View`] tree: a single [`PlotView`], a [`LayerView`] of plot
//! views drawn on shared scales, or a horizontal/vertical concatenation of
//! views. Keeping plot-relevant fields (mark, encodings, selections, size) in
//! `PlotView` lets auxiliary views be derived by copying a plain value instead
//! of filtering keys.

pub mod options;

pub use options::{
    legend_value, Annotation, Annotations, BinArg, ChartOptions, Direction, GroupArg,
    LegendOrient, MinimapLocation, PanZoom, Stack,
};

use crate::encoding::{Channel, Encodings};
use crate::DataFrame;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Marks
// =============================================================================

/// Visual primitive of a plot view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Line,
    Area,
    Bar,
    Circle,
    Arc,
    Rect,
    Tick,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: MarkType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub tooltip: bool,
    #[serde(rename = "innerRadius", skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl Mark {
    /// Mark with tooltips enabled, as used by every chart family
    pub fn new(mark_type: MarkType) -> Self {
        Self {
            mark_type,
            tooltip: true,
            inner_radius: None,
            thickness: None,
        }
    }

    /// Bare rule mark used for annotations
    pub fn rule() -> Self {
        Self {
            tooltip: false,
            ..Self::new(MarkType::Rule)
        }
    }

    pub fn with_inner_radius(mut self, radius: u32) -> Self {
        self.inner_radius = Some(radius);
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

// =============================================================================
// Selections and Transforms
// =============================================================================

/// Named interactive selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encodings: Option<Vec<Channel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate: Option<bool>,
}

impl Selection {
    /// Interval selection bound to the view's scales (pan and zoom)
    pub fn scales() -> Self {
        Self {
            kind: "interval",
            bind: Some("scales"),
            encodings: None,
            zoom: None,
            translate: None,
        }
    }

    /// Interval brush over the given channels
    pub fn brush(channels: &[Channel]) -> Self {
        Self {
            kind: "interval",
            bind: None,
            encodings: Some(channels.to_vec()),
            zoom: None,
            translate: None,
        }
    }
}

/// Selections of a view, keyed by selection name
pub type Selections = BTreeMap<String, Selection>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionFilter {
    pub selection: String,
}

/// Data transform applied to a view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Keep rows inside a selection
    Filter(SelectionFilter),
}

impl Transform {
    pub fn filter_by(selection: &str) -> Self {
        Transform::Filter(SelectionFilter {
            selection: selection.to_string(),
        })
    }
}

// =============================================================================
// Views
// =============================================================================

/// Plot-relevant part of a chart: one mark with its encodings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView {
    pub mark: Mark,
    pub encoding: Encodings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selections>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PlotView {
    pub fn new(mark: Mark, encoding: Encodings) -> Self {
        Self {
            mark,
            encoding,
            selection: None,
            transform: Vec::new(),
            width: None,
            height: None,
        }
    }

    pub fn with_selection(mut self, selection: Option<Selections>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Plot views drawn on top of each other with shared scales
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerView {
    pub layer: Vec<PlotView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// View tree of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View {
    Plot(PlotView),
    Layer(LayerView),
    HConcat { hconcat: Vec<View> },
    VConcat { vconcat: Vec<View> },
}

impl View {
    /// Set the size of a plot or layer view; concatenations are sized by their children
    pub fn set_size(&mut self, width: Option<u32>, height: Option<u32>) {
        match self {
            View::Plot(plot) => {
                plot.width = width;
                plot.height = height;
            }
            View::Layer(layer) => {
                layer.width = width;
                layer.height = height;
            }
            View::HConcat { .. } | View::VConcat { .. } => {}
        }
    }

    /// The plot view carrying the chart's data marks
    ///
    /// For layered views that is the first layer; annotation layers follow it.
    pub fn base_plot(&self) -> Option<&PlotView> {
        match self {
            View::Plot(plot) => Some(plot),
            View::Layer(layer) => layer.layer.first(),
            View::HConcat { .. } | View::VConcat { .. } => None,
        }
    }

    pub fn base_plot_mut(&mut self) -> Option<&mut PlotView> {
        match self {
            View::Plot(plot) => Some(plot),
            View::Layer(layer) => layer.layer.first_mut(),
            View::HConcat { .. } | View::VConcat { .. } => None,
        }
    }

    /// Size of a plot or layer view
    pub fn size(&self) -> (Option<u32>, Option<u32>) {
        match self {
            View::Plot(plot) => (plot.width, plot.height),
            View::Layer(layer) => (layer.width, layer.height),
            View::HConcat { .. } | View::VConcat { .. } => (None, None),
        }
    }

    pub fn is_concat(&self) -> bool {
        matches!(self, View::HConcat { .. } | View::VConcat { .. })
    }
}

// =============================================================================
// Chart Spec
// =============================================================================

/// Chart-wide fields that are not part of any plot view
#[derive(Debug, Clone, Default)]
pub struct Meta {
    /// Dataset the chart reads from, inlined by the writer
    pub data: Option<DataFrame>,
    pub title: Option<String>,
    /// Top-level view configuration (`{"stroke": null}` for pies)
    pub view_config: Option<Value>,
}

/// Complete chart specification
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub meta: Meta,
    pub view: View,
}

/// How the rendering sink should size the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizingPolicy {
    /// Stretch to the container width, taking precedence over an explicit width
    pub use_container_width: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;
    use serde_json::json;

    fn plot() -> PlotView {
        PlotView::new(
            Mark::new(MarkType::Line),
            Encodings {
                x: Some(Encoding::field("a")),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_mark_serialization() {
        assert_eq!(
            json!(Mark::new(MarkType::Arc).with_inner_radius(50)),
            json!({"type": "arc", "tooltip": true, "innerRadius": 50})
        );
        assert_eq!(json!(Mark::rule()), json!({"type": "rule"}));
    }

    #[test]
    fn test_plot_view_serialization() {
        let view = View::Plot(plot().with_size(Some(400), None));
        assert_eq!(
            json!(view),
            json!({
                "mark": {"type": "line", "tooltip": true},
                "encoding": {"x": {"field": "a"}},
                "width": 400,
            })
        );
    }

    #[test]
    fn test_concat_serialization() {
        let view = View::VConcat {
            vconcat: vec![View::Plot(plot()), View::HConcat { hconcat: vec![] }],
        };
        let value = json!(view);
        assert!(value["vconcat"].is_array());
        assert_eq!(value["vconcat"][1], json!({"hconcat": []}));
    }

    #[test]
    fn test_selection_serialization() {
        assert_eq!(
            json!(Selection::brush(&[Channel::X, Channel::Y])),
            json!({"type": "interval", "encodings": ["x", "y"]})
        );
        assert_eq!(
            json!(Selection::scales()),
            json!({"type": "interval", "bind": "scales"})
        );
        assert_eq!(
            json!(Transform::filter_by("brush")),
            json!({"filter": {"selection": "brush"}})
        );
    }

    #[test]
    fn test_set_size_and_base_plot() {
        let mut view = View::Layer(LayerView {
            layer: vec![plot(), PlotView::new(Mark::rule(), Encodings::default())],
            width: None,
            height: None,
        });
        view.set_size(Some(300), Some(200));
        assert_eq!(view.size(), (Some(300), Some(200)));
        assert_eq!(view.base_plot().unwrap().mark.mark_type, MarkType::Line);
        assert!(!view.is_concat());
    }
}
