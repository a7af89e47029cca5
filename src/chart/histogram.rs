//! Histograms
//!
//! - [`Histogram`]: one binned axis, bar heights from an aggregate
//! - [`XyHistogram`]: two binned axes, cell colors from an aggregate
//! - [`TimeHistogram`]: one date field bucketed by two time units
//!
//! The aggregate (`count` by default) needs no column; when none is given
//! the aggregated channel is just `{"aggregate": ...}`. Histograms support
//! scale-bound pan/zoom but never a minimap.

use super::{assemble, pan_zoom_selection, Chart, ChartBuilder};
use crate::compose::add_annotations;
use crate::encoding::{normalize, opts, ChannelArg, ChannelOptions, Encoding, Encodings, FieldType};
use crate::plot::{
    legend_value, Annotation, Annotations, BinArg, ChartOptions, LegendOrient, Mark, MarkType,
    PanZoom, PlotView,
};
use crate::{DataFrame, Result};
use serde_json::{json, Value};

const DEFAULT_AGGREGATE: &str = "count";

fn histogram_options() -> ChartOptions {
    ChartOptions::new(Some(LegendOrient::Bottom), PanZoom::Off, true)
}

/// Encoding of an aggregated channel, with or without a column
fn aggregated(df: &DataFrame, arg: Option<&ChannelArg>, options: ChannelOptions) -> Encoding {
    match arg {
        Some(arg) => normalize(df, arg, options),
        None => Encoding::from_custom(options),
    }
}

/// Wrap the histogram plot with annotations and chart-wide fields
fn finish(
    df: &DataFrame,
    plot: PlotView,
    annotations: &Annotations,
    options: &ChartOptions,
) -> Chart {
    let plot = plot.with_selection(pan_zoom_selection(options.pan_zoom));
    let view = add_annotations(plot, annotations);
    let spec = assemble(df.clone(), view, options);
    Chart::new(spec, options.use_container_width)
}

// =============================================================================
// 1-D Histogram
// =============================================================================

#[derive(Debug, Clone)]
pub struct Histogram {
    x: ChannelArg,
    y: Option<ChannelArg>,
    aggregate: String,
    bin: BinArg,
    annotations: Annotations,
    options: ChartOptions,
}

impl Histogram {
    /// Histogram of the values of `x`
    pub fn new(x: impl Into<ChannelArg>) -> Self {
        Self {
            x: x.into(),
            y: None,
            aggregate: DEFAULT_AGGREGATE.to_string(),
            bin: BinArg::default(),
            annotations: Annotations::default(),
            options: histogram_options(),
        }
    }

    /// Column to aggregate per bin
    pub fn with_y(mut self, y: impl Into<ChannelArg>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Aggregate operation (`count`, `sum`, `mean`, ...)
    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = aggregate.into();
        self
    }

    pub fn with_bin(mut self, bin: impl Into<BinArg>) -> Self {
        self.bin = bin.into();
        self
    }

    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.x.extend(annotations);
        self
    }

    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.y.extend(annotations);
        self
    }
}

impl ChartBuilder for Histogram {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        tracing::debug!(aggregate = %self.aggregate, "Building histogram");
        let encoding = Encodings {
            x: Some(normalize(df, &self.x, opts([("bin", self.bin.to_json())]))),
            y: Some(aggregated(
                df,
                self.y.as_ref(),
                opts([("aggregate", json!(self.aggregate))]),
            )),
            ..Default::default()
        };
        let plot = PlotView::new(Mark::new(MarkType::Bar), encoding);
        Ok(finish(df, plot, &self.annotations, &self.options))
    }
}

// =============================================================================
// 2-D Histogram
// =============================================================================

#[derive(Debug, Clone)]
pub struct XyHistogram {
    x: ChannelArg,
    y: ChannelArg,
    color: Option<ChannelArg>,
    aggregate: String,
    x_bin: BinArg,
    y_bin: BinArg,
    annotations: Annotations,
    options: ChartOptions,
}

impl XyHistogram {
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<ChannelArg>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            aggregate: DEFAULT_AGGREGATE.to_string(),
            x_bin: BinArg::default(),
            y_bin: BinArg::default(),
            annotations: Annotations::default(),
            options: histogram_options(),
        }
    }

    /// Column aggregated into each cell's color
    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = aggregate.into();
        self
    }

    pub fn with_x_bin(mut self, bin: impl Into<BinArg>) -> Self {
        self.x_bin = bin.into();
        self
    }

    pub fn with_y_bin(mut self, bin: impl Into<BinArg>) -> Self {
        self.y_bin = bin.into();
        self
    }

    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.x.extend(annotations);
        self
    }

    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.y.extend(annotations);
        self
    }
}

impl ChartBuilder for XyHistogram {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        tracing::debug!(aggregate = %self.aggregate, "Building 2-D histogram");
        let encoding = Encodings {
            x: Some(normalize(df, &self.x, opts([("bin", self.x_bin.to_json())]))),
            y: Some(normalize(df, &self.y, opts([("bin", self.y_bin.to_json())]))),
            color: Some(aggregated(
                df,
                self.color.as_ref(),
                opts([
                    ("aggregate", json!(self.aggregate)),
                    ("legend", legend_value(self.options.legend)),
                ]),
            )),
            ..Default::default()
        };
        let plot = PlotView::new(Mark::new(MarkType::Rect), encoding);
        Ok(finish(df, plot, &self.annotations, &self.options))
    }
}

// =============================================================================
// Time Histogram
// =============================================================================

/// Heatmap of one date field bucketed by two time units
///
/// For example `x_unit = "hours"` and `y_unit = "day"` shows activity per
/// hour of the day for each day of the week.
#[derive(Debug, Clone)]
pub struct TimeHistogram {
    date: String,
    x_unit: String,
    y_unit: String,
    color: Option<ChannelArg>,
    aggregate: String,
    annotations: Annotations,
    options: ChartOptions,
}

impl TimeHistogram {
    pub fn new(
        date: impl Into<String>,
        x_unit: impl Into<String>,
        y_unit: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            x_unit: x_unit.into(),
            y_unit: y_unit.into(),
            color: None,
            aggregate: DEFAULT_AGGREGATE.to_string(),
            annotations: Annotations::default(),
            options: histogram_options(),
        }
    }

    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = aggregate.into();
        self
    }

    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.x.extend(annotations);
        self
    }

    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.y.extend(annotations);
        self
    }

    fn time_axis(&self, unit: &str) -> Encoding {
        Encoding::field(self.date.as_str())
            .with_type(FieldType::Ordinal)
            .with("timeUnit", json!(unit))
            .with("title", Value::Null)
            .with("axis", json!({"tickBand": "extent"}))
    }
}

impl ChartBuilder for TimeHistogram {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        tracing::debug!(
            date = %self.date,
            x_unit = %self.x_unit,
            y_unit = %self.y_unit,
            "Building time histogram"
        );
        let encoding = Encodings {
            x: Some(self.time_axis(&self.x_unit)),
            y: Some(self.time_axis(&self.y_unit)),
            color: Some(aggregated(
                df,
                self.color.as_ref(),
                opts([
                    ("aggregate", json!(self.aggregate)),
                    ("legend", legend_value(self.options.legend)),
                ]),
            )),
            ..Default::default()
        };
        let plot = PlotView::new(Mark::new(MarkType::Rect), encoding);
        Ok(finish(df, plot, &self.annotations, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::View;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df! {
            "x" => &[1.0, 2.0, 2.5, 3.0],
            "y" => &[1.0, 1.5, 2.0, 4.0],
            "w" => &[1, 2, 3, 4],
        }
        .unwrap()
    }

    fn plot(chart: &Chart) -> &PlotView {
        chart.spec.view.base_plot().unwrap()
    }

    #[test]
    fn test_histogram_defaults() {
        let chart = Histogram::new("x").build(&frame()).unwrap();
        assert_eq!(
            json!(plot(&chart).encoding),
            json!({
                "x": {"field": "x", "type": "quantitative", "bin": true},
                "y": {"aggregate": "count"},
            })
        );
        assert_eq!(plot(&chart).selection, None);
        assert!(chart.sizing.use_container_width);
    }

    #[test]
    fn test_histogram_with_column_and_bins() {
        let chart = Histogram::new("x")
            .with_y("w")
            .with_aggregate("sum")
            .with_bin(BinArg::max_bins(5))
            .build(&frame())
            .unwrap();
        let enc = &plot(&chart).encoding;
        assert_eq!(enc.x.as_ref().unwrap().get("bin"), Some(&json!({"maxbins": 5})));
        assert_eq!(
            json!(enc.y),
            json!({"field": "w", "type": "quantitative", "aggregate": "sum"})
        );
    }

    #[test]
    fn test_histogram_bin_disabled() {
        let chart = Histogram::new("x").with_bin(false).build(&frame()).unwrap();
        assert_eq!(
            plot(&chart).encoding.x.as_ref().unwrap().get("bin"),
            Some(&json!(false))
        );
    }

    #[test]
    fn test_minimap_mode_adds_nothing() {
        let chart = Histogram::new("x")
            .with_pan_zoom(PanZoom::Minimap)
            .build(&frame())
            .unwrap();
        assert!(matches!(chart.spec.view, View::Plot(_)));
        assert_eq!(plot(&chart).selection, None);

        let chart = Histogram::new("x")
            .with_pan_zoom(PanZoom::Both)
            .build(&frame())
            .unwrap();
        assert!(plot(&chart).selection.is_some());
    }

    #[test]
    fn test_xy_histogram_color_column() {
        let chart = XyHistogram::new("x", "y")
            .with_color("w")
            .with_aggregate("mean")
            .with_y_bin(false)
            .build(&frame())
            .unwrap();
        let enc = &plot(&chart).encoding;
        assert_eq!(enc.y.as_ref().unwrap().get("bin"), Some(&json!(false)));
        assert_eq!(
            json!(enc.color),
            json!({
                "field": "w",
                "type": "quantitative",
                "aggregate": "mean",
                "legend": {"orient": "bottom"},
            })
        );
    }

    #[test]
    fn test_time_histogram_axes() {
        let chart = TimeHistogram::new("when", "hours", "day")
            .with_legend(None)
            .build(&frame())
            .unwrap();
        let enc = &plot(&chart).encoding;
        assert_eq!(
            json!(enc.x),
            json!({
                "field": "when",
                "type": "ordinal",
                "timeUnit": "hours",
                "title": null,
                "axis": {"tickBand": "extent"},
            })
        );
        assert_eq!(enc.y.as_ref().unwrap().get("timeUnit"), Some(&json!("day")));
        assert_eq!(
            json!(enc.color),
            json!({"aggregate": "count", "legend": {"disable": true}})
        );
        assert_eq!(plot(&chart).mark.mark_type, MarkType::Rect);
    }

    #[test]
    fn test_annotations_wrap_histogram() {
        let chart = Histogram::new("x")
            .with_x_annotations([Annotation::labeled(2.0, "median")])
            .build(&frame())
            .unwrap();
        assert!(matches!(&chart.spec.view, View::Layer(layer) if layer.layer.len() == 2));
    }
}
