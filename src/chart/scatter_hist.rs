//! Scatter chart with marginal histograms

use super::{assemble, Chart, ChartBuilder};
use crate::compose::{with_marginals, x_histogram, y_histogram, MarginalSettings};
use crate::encoding::{normalize, normalize_opt, opts, ChannelArg, ChannelOptions, Encodings};
use crate::plot::{
    legend_value, BinArg, ChartOptions, LegendOrient, Mark, MarkType, PanZoom, PlotView,
};
use crate::{DataFrame, Result};

/// Scatter plot framed by histograms of its x values (top) and y values (right)
///
/// The layout is a concatenation, so `pan_zoom` is ignored and the chart
/// width and height apply to the scatter plot itself.
#[derive(Debug, Clone)]
pub struct ScatterHistogram {
    x: ChannelArg,
    y: ChannelArg,
    color: Option<ChannelArg>,
    size: Option<ChannelArg>,
    opacity: Option<ChannelArg>,
    settings: MarginalSettings,
    options: ChartOptions,
}

impl ScatterHistogram {
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<ChannelArg>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            size: None,
            opacity: None,
            settings: MarginalSettings::default(),
            options: ChartOptions::new(Some(LegendOrient::Bottom), PanZoom::Off, true),
        }
    }

    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<ChannelArg>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_opacity(mut self, opacity: impl Into<ChannelArg>) -> Self {
        self.opacity = Some(opacity.into());
        self
    }

    /// Aggregate drawn by both histograms
    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.settings.aggregate = aggregate.into();
        self
    }

    pub fn with_x_bin(mut self, bin: impl Into<BinArg>) -> Self {
        self.settings.x_bin = bin.into();
        self
    }

    pub fn with_y_bin(mut self, bin: impl Into<BinArg>) -> Self {
        self.settings.y_bin = bin.into();
        self
    }
}

impl ChartBuilder for ScatterHistogram {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        let options = &self.options;
        tracing::debug!(aggregate = %self.settings.aggregate, "Building scatter histogram");

        let legend = legend_value(options.legend);
        let with_legend = || opts([("legend", legend.clone())]);

        let encoding = Encodings {
            x: Some(normalize(df, &self.x, ChannelOptions::new())),
            y: Some(normalize(df, &self.y, ChannelOptions::new())),
            color: normalize_opt(df, self.color.as_ref(), with_legend()),
            size: normalize_opt(df, self.size.as_ref(), with_legend()),
            opacity: normalize_opt(df, self.opacity.as_ref(), with_legend()),
            ..Default::default()
        };
        let scatter = PlotView::new(Mark::new(MarkType::Circle), encoding)
            .with_size(options.width, options.height);

        let x_hist = x_histogram(df, &self.x, &self.y, &self.settings, options.width);
        let y_hist = y_histogram(df, &self.x, &self.y, &self.settings, options.height);

        let spec = assemble(df.clone(), with_marginals(scatter, x_hist, y_hist), options);
        Ok(Chart::new(spec, options.use_container_width))
    }
}
