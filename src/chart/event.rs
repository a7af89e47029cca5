//! Event (tick) charts

use super::{assemble, pan_zoom_selection, with_minimap, Chart, ChartBuilder};
use crate::compose::add_annotations;
use crate::encoding::{normalize, normalize_opt, opts, Channel, ChannelArg, ChannelOptions, Encodings};
use crate::plot::{
    legend_value, Annotation, Annotations, ChartOptions, Mark, MarkType, MinimapLocation,
    PlotView,
};
use crate::{DataFrame, Result};

const DEFAULT_OPACITY: f64 = 0.5;
const DEFAULT_THICKNESS: f64 = 2.0;

/// One tick per event, at `x` along the lane given by `y`
///
/// Ticks are half transparent unless another opacity is set, so that
/// overlapping events stay visible.
#[derive(Debug, Clone)]
pub struct EventChart {
    x: ChannelArg,
    y: ChannelArg,
    color: Option<ChannelArg>,
    size: Option<ChannelArg>,
    opacity: Option<ChannelArg>,
    thickness: f64,
    annotations: Annotations,
    options: ChartOptions,
}

impl EventChart {
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<ChannelArg>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            size: None,
            opacity: Some(ChannelArg::from(DEFAULT_OPACITY)),
            thickness: DEFAULT_THICKNESS,
            annotations: Annotations::default(),
            options: ChartOptions::default(),
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

    /// Use the renderer's default opacity
    pub fn without_opacity(mut self) -> Self {
        self.opacity = None;
        self
    }

    /// Tick thickness in pixels
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
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

impl ChartBuilder for EventChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        let options = &self.options;
        tracing::debug!(thickness = self.thickness, "Building event chart");

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

        let mark = Mark::new(MarkType::Tick).with_thickness(self.thickness);
        let plot =
            PlotView::new(mark, encoding).with_selection(pan_zoom_selection(options.pan_zoom));
        let view = add_annotations(plot, &self.annotations);
        let spec = assemble(df.clone(), view, options);
        let spec = with_minimap(spec, options, &[Channel::X], MinimapLocation::Bottom, false)?;

        Ok(Chart::new(spec, options.use_container_width))
    }
}
