//! Line and area charts
//!
//! Both draw one or more series over a shared x axis. Several value columns
//! are reshaped into long format and colored by series; an explicit color
//! argument replaces the series coloring.

use super::{assemble, pan_zoom_selection, with_minimap, Chart, ChartBuilder};
use crate::compose::add_annotations;
use crate::encoding::{
    normalize, normalize_opt, opts, Channel, ChannelArg, ChannelOptions, Encodings, SeriesArg,
};
use crate::plot::{
    legend_value, Annotation, Annotations, ChartOptions, Mark, MarkType, MinimapLocation,
    PlotView, Stack,
};
use crate::reshape::reshape;
use crate::{DataFrame, Result};

/// Channel arguments shared by line and area charts
#[derive(Debug, Clone)]
struct SeriesChannels {
    x: ChannelArg,
    y: SeriesArg,
    color: Option<ChannelArg>,
    opacity: Option<ChannelArg>,
    annotations: Annotations,
}

impl SeriesChannels {
    fn new(x: ChannelArg, y: SeriesArg) -> Self {
        Self {
            x,
            y,
            color: None,
            opacity: None,
            annotations: Annotations::default(),
        }
    }

    fn build(
        &self,
        df: &DataFrame,
        mark: MarkType,
        stack: Option<&Stack>,
        options: &ChartOptions,
    ) -> Result<Chart> {
        tracing::debug!(mark = ?mark, pan_zoom = ?options.pan_zoom, "Building series chart");

        let legend = legend_value(options.legend);
        let keep = [self.color.as_ref(), self.opacity.as_ref()];
        let reshaped = reshape(df, Some(&self.x), &self.y, &legend, &keep)?;
        let data = reshaped.data;

        let color = match &self.color {
            Some(color) => Some(normalize(&data, color, opts([("legend", legend)]))),
            None => reshaped.series,
        };

        let mut y = reshaped.value;
        if let Some(stack) = stack {
            y.set("stack", stack.to_json());
        }

        let encoding = Encodings {
            x: Some(normalize(&data, &self.x, ChannelOptions::new())),
            y: Some(y),
            color,
            opacity: normalize_opt(&data, self.opacity.as_ref(), ChannelOptions::new()),
            ..Default::default()
        };

        let plot = PlotView::new(Mark::new(mark), encoding)
            .with_selection(pan_zoom_selection(options.pan_zoom));
        let view = add_annotations(plot, &self.annotations);
        let spec = assemble(data, view, options);
        let spec = with_minimap(spec, options, &[Channel::X], MinimapLocation::Bottom, false)?;

        Ok(Chart::new(spec, options.use_container_width))
    }
}

/// Line chart over one or more series
#[derive(Debug, Clone)]
pub struct LineChart {
    channels: SeriesChannels,
    options: ChartOptions,
}

impl LineChart {
    /// Line chart of `y` (one column or several) against `x`
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<SeriesArg>) -> Self {
        Self {
            channels: SeriesChannels::new(x.into(), y.into()),
            options: ChartOptions::default(),
        }
    }

    /// Color by a column or use a literal color
    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.channels.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: impl Into<ChannelArg>) -> Self {
        self.channels.opacity = Some(opacity.into());
        self
    }

    /// Marker lines at x coordinates
    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.channels.annotations.x.extend(annotations);
        self
    }

    /// Marker lines at y coordinates
    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.channels.annotations.y.extend(annotations);
        self
    }
}

impl ChartBuilder for LineChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        self.channels.build(df, MarkType::Line, None, &self.options)
    }
}

/// Area chart over one or more series, stacked from zero by default
#[derive(Debug, Clone)]
pub struct AreaChart {
    channels: SeriesChannels,
    stack: Stack,
    options: ChartOptions,
}

impl AreaChart {
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<SeriesArg>) -> Self {
        Self {
            channels: SeriesChannels::new(x.into(), y.into()),
            stack: Stack::default(),
            options: ChartOptions::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.channels.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: impl Into<ChannelArg>) -> Self {
        self.channels.opacity = Some(opacity.into());
        self
    }

    /// Stacking mode of the areas
    pub fn with_stack(mut self, stack: impl Into<Stack>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.channels.annotations.x.extend(annotations);
        self
    }

    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.channels.annotations.y.extend(annotations);
        self
    }
}

impl ChartBuilder for AreaChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        self.channels
            .build(df, MarkType::Area, Some(&self.stack), &self.options)
    }
}
