//! Pie and donut charts

use super::{assemble, Chart, ChartBuilder};
use crate::encoding::{normalize, opts, ChannelArg, ChannelOptions, Encodings};
use crate::naming::DEFAULT_CHART_SIZE;
use crate::plot::{
    legend_value, ChartOptions, ChartSpec, LegendOrient, Mark, MarkType, PanZoom, PlotView, View,
};
use crate::{DataFrame, Result};
use serde_json::{json, Value};

/// Arc view shared by pies and donuts
fn pie_spec(
    df: &DataFrame,
    theta: &ChannelArg,
    color: &ChannelArg,
    mark: Mark,
    options: &ChartOptions,
) -> ChartSpec {
    let encoding = Encodings {
        theta: Some(normalize(df, theta, ChannelOptions::new())),
        color: Some(normalize(
            df,
            color,
            opts([("title", Value::Null), ("legend", legend_value(options.legend))]),
        )),
        ..Default::default()
    };
    let mut spec = assemble(df.clone(), View::Plot(PlotView::new(mark, encoding)), options);
    spec.meta.view_config = Some(json!({"stroke": null}));
    spec
}

fn pie_options() -> ChartOptions {
    ChartOptions::new(Some(LegendOrient::Right), PanZoom::Off, true)
}

/// Pie chart: slice angles from `theta`, slices colored by `color`
#[derive(Debug, Clone)]
pub struct PieChart {
    theta: ChannelArg,
    color: ChannelArg,
    options: ChartOptions,
}

impl PieChart {
    pub fn new(theta: impl Into<ChannelArg>, color: impl Into<ChannelArg>) -> Self {
        Self {
            theta: theta.into(),
            color: color.into(),
            options: pie_options(),
        }
    }
}

impl ChartBuilder for PieChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        tracing::debug!("Building pie chart");
        let mark = Mark::new(MarkType::Arc);
        let spec = pie_spec(df, &self.theta, &self.color, mark, &self.options);
        Ok(Chart::new(spec, self.options.use_container_width))
    }
}

/// Pie chart with a hole of a quarter of the chart height
#[derive(Debug, Clone)]
pub struct DonutChart {
    theta: ChannelArg,
    color: ChannelArg,
    options: ChartOptions,
}

impl DonutChart {
    pub fn new(theta: impl Into<ChannelArg>, color: impl Into<ChannelArg>) -> Self {
        Self {
            theta: theta.into(),
            color: color.into(),
            options: pie_options(),
        }
    }

    /// Inner radius for a chart height, falling back to the renderer's default height
    pub fn inner_radius(height: Option<u32>) -> u32 {
        match height {
            Some(height) if height > 0 => height / 4,
            _ => DEFAULT_CHART_SIZE / 4,
        }
    }
}

impl ChartBuilder for DonutChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        let radius = Self::inner_radius(self.options.height);
        tracing::debug!(inner_radius = radius, "Building donut chart");
        let mark = Mark::new(MarkType::Arc).with_inner_radius(radius);
        let spec = pie_spec(df, &self.theta, &self.color, mark, &self.options);
        Ok(Chart::new(spec, self.options.use_container_width))
    }
}
