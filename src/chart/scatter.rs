//! Scatter charts

use super::{assemble, pan_zoom_selection, with_minimap, Chart, ChartBuilder};
use crate::compose::add_annotations;
use crate::encoding::{
    normalize, normalize_opt, opts, Channel, ChannelArg, ChannelOptions, Encodings, SeriesArg,
};
use crate::plot::{
    legend_value, Annotation, Annotations, ChartOptions, LegendOrient, Mark, MarkType,
    MinimapLocation, PanZoom, PlotView,
};
use crate::reshape::reshape;
use crate::{DataFrame, Result};

/// Circles at (x, y), optionally colored, sized and faded by other columns
///
/// Several y columns are reshaped into long format and colored by series.
/// The minimap of a scatter chart brushes both axes.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    x: ChannelArg,
    y: SeriesArg,
    color: Option<ChannelArg>,
    size: Option<ChannelArg>,
    opacity: Option<ChannelArg>,
    annotations: Annotations,
    options: ChartOptions,
}

impl ScatterChart {
    pub fn new(x: impl Into<ChannelArg>, y: impl Into<SeriesArg>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            size: None,
            opacity: None,
            annotations: Annotations::default(),
            options: ChartOptions::new(Some(LegendOrient::Right), PanZoom::Both, true),
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

    pub fn with_x_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.x.extend(annotations);
        self
    }

    pub fn with_y_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.y.extend(annotations);
        self
    }
}

impl ChartBuilder for ScatterChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        let options = &self.options;
        tracing::debug!(pan_zoom = ?options.pan_zoom, "Building scatter chart");

        let legend = legend_value(options.legend);
        let reshaped = reshape(
            df,
            Some(&self.x),
            &self.y,
            &legend,
            &[self.color.as_ref(), self.size.as_ref(), self.opacity.as_ref()],
        )?;
        let data = reshaped.data;

        let with_legend = || opts([("legend", legend.clone())]);
        let color = match &self.color {
            Some(color) => Some(normalize(&data, color, with_legend())),
            None => reshaped.series,
        };

        let encoding = Encodings {
            x: Some(normalize(&data, &self.x, ChannelOptions::new())),
            y: Some(reshaped.value),
            color,
            size: normalize_opt(&data, self.size.as_ref(), with_legend()),
            opacity: normalize_opt(&data, self.opacity.as_ref(), with_legend()),
            ..Default::default()
        };

        let plot = PlotView::new(Mark::new(MarkType::Circle), encoding)
            .with_selection(pan_zoom_selection(options.pan_zoom));
        let view = add_annotations(plot, &self.annotations);
        let spec = assemble(data, view, options);
        let spec = with_minimap(
            spec,
            options,
            &[Channel::X, Channel::Y],
            MinimapLocation::Bottom,
            false,
        )?;

        Ok(Chart::new(spec, options.use_container_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{DEFAULT_CHART_SIZE, SERIES_NAME_COLUMN};
    use crate::plot::View;
    use polars::prelude::*;
    use serde_json::json;

    fn frame() -> DataFrame {
        df! {
            "x" => &[1.0, 2.0, 3.0],
            "y1" => &[3.0, 1.0, 2.0],
            "y2" => &[2.0, 2.5, 1.0],
            "w" => &[1, 5, 9],
            "kind" => &["a", "b", "a"],
        }
        .unwrap()
    }

    #[test]
    fn test_size_column_carries_legend() {
        let chart = ScatterChart::new("x", "y1")
            .with_size("w")
            .build(&frame())
            .unwrap();
        let plot = chart.spec.view.base_plot().unwrap();
        assert_eq!(
            json!(plot.encoding.size),
            json!({"field": "w", "type": "quantitative", "legend": {"orient": "right"}})
        );
        assert_eq!(plot.mark.mark_type, MarkType::Circle);
    }

    #[test]
    fn test_multi_series_keeps_size_column() {
        let chart = ScatterChart::new("x", ["y1", "y2"])
            .with_size("w")
            .build(&frame())
            .unwrap();
        let data = chart.spec.meta.data.as_ref().unwrap();
        assert_eq!(data.height(), 6);
        assert!(data.column("w").is_ok());
        let plot = chart.spec.view.base_plot().unwrap();
        assert_eq!(
            plot.encoding.color.as_ref().unwrap().field.as_deref(),
            Some(SERIES_NAME_COLUMN)
        );
    }

    #[test]
    fn test_two_dimensional_minimap() {
        let chart = ScatterChart::new("x", "y1")
            .with_pan_zoom(PanZoom::Minimap)
            .build(&frame())
            .unwrap();
        let View::VConcat { vconcat } = &chart.spec.view else {
            panic!("expected vconcat");
        };
        let primary = vconcat[0].base_plot().unwrap();
        assert_eq!(primary.selection, None);
        for enc in [&primary.encoding.x, &primary.encoding.y] {
            assert!(enc.as_ref().unwrap().get("scale").is_some());
        }
        let mini = vconcat[1].base_plot().unwrap();
        assert_eq!(mini.width, Some(DEFAULT_CHART_SIZE / 2));
        assert_eq!(mini.height, Some(DEFAULT_CHART_SIZE / 2));
        assert_eq!(
            json!(mini.selection),
            json!({"brush": {"type": "interval", "encodings": ["x", "y"]}})
        );
    }

    #[test]
    fn test_multi_series_color_column() {
        let chart = ScatterChart::new("x", ["y1", "y2"])
            .with_color("kind")
            .build(&frame())
            .unwrap();
        let data = chart.spec.meta.data.as_ref().unwrap();
        assert!(data.column("kind").is_ok());
        let plot = chart.spec.view.base_plot().unwrap();
        assert_eq!(
            json!(plot.encoding.color),
            json!({"field": "kind", "type": "nominal", "legend": {"orient": "right"}})
        );
    }
}
