//! Marginal histograms
//!
//! Bar histograms of the x and y fields of a scatter plot, drawn along its
//! top and right edges: `vconcat: [x_hist, {hconcat: [scatter, y_hist]}]`.

use crate::encoding::{normalize, opts, ChannelArg, Encodings};
use crate::naming::MINI_CHART_SIZE;
use crate::plot::{BinArg, Mark, MarkType, PlotView, View};
use crate::DataFrame;
use serde_json::{json, Value};

/// Binning and aggregation shared by both marginal histograms
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalSettings {
    pub aggregate: String,
    pub x_bin: BinArg,
    pub y_bin: BinArg,
}

impl Default for MarginalSettings {
    fn default() -> Self {
        Self {
            aggregate: "count".to_string(),
            x_bin: BinArg::default(),
            y_bin: BinArg::default(),
        }
    }
}

/// Histogram of the x field, as wide as the scatter plot
pub fn x_histogram(
    df: &DataFrame,
    x: &ChannelArg,
    y: &ChannelArg,
    settings: &MarginalSettings,
    width: Option<u32>,
) -> PlotView {
    let encoding = Encodings {
        x: Some(normalize(
            df,
            x,
            opts([
                ("bin", settings.x_bin.to_json()),
                ("title", Value::Null),
                ("axis", Value::Null),
            ]),
        )),
        y: Some(normalize(
            df,
            y,
            opts([("aggregate", json!(settings.aggregate)), ("title", Value::Null)]),
        )),
        ..Default::default()
    };
    PlotView::new(Mark::new(MarkType::Bar), encoding).with_size(width, Some(MINI_CHART_SIZE))
}

/// Histogram of the y field, as tall as the scatter plot
pub fn y_histogram(
    df: &DataFrame,
    x: &ChannelArg,
    y: &ChannelArg,
    settings: &MarginalSettings,
    height: Option<u32>,
) -> PlotView {
    let encoding = Encodings {
        x: Some(normalize(
            df,
            x,
            opts([("aggregate", json!(settings.aggregate)), ("title", Value::Null)]),
        )),
        y: Some(normalize(
            df,
            y,
            opts([
                ("bin", settings.y_bin.to_json()),
                ("title", Value::Null),
                ("axis", Value::Null),
            ]),
        )),
        ..Default::default()
    };
    PlotView::new(Mark::new(MarkType::Bar), encoding).with_size(Some(MINI_CHART_SIZE), height)
}

/// Arrange a scatter plot with its marginal histograms
pub fn with_marginals(scatter: PlotView, x_hist: PlotView, y_hist: PlotView) -> View {
    View::VConcat {
        vconcat: vec![
            View::Plot(x_hist),
            View::HConcat {
                hconcat: vec![View::Plot(scatter), View::Plot(y_hist)],
            },
        ],
    }
}
