//! Bar charts
//!
//! Bars are positioned along the `bar` column and sized by one or more value
//! columns. Several value columns are reshaped into long format and either
//! stacked (the default) or grouped side by side in facet columns. A
//! horizontal bar chart is the vertical one with x/y and row/column swapped.

use super::{assemble, with_minimap, Chart, ChartBuilder};
use crate::encoding::{
    normalize, normalize_opt, opts, Channel, ChannelArg, ChannelOptions, Encoding, Encodings,
    SeriesArg,
};
use crate::naming::{GROUP_SPACING, SERIES_NAME_COLUMN, SERIES_VALUE_COLUMN};
use crate::plot::{
    legend_value, ChartOptions, Direction, GroupArg, LegendOrient, Mark, MarkType,
    MinimapLocation, PanZoom, PlotView, Stack, View,
};
use crate::reshape::reshape;
use crate::{DataFrame, Result, VegaplotError};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct BarChart {
    bar: ChannelArg,
    value: SeriesArg,
    color: Option<ChannelArg>,
    opacity: Option<ChannelArg>,
    group: Option<GroupArg>,
    stack: Stack,
    direction: Direction,
    options: ChartOptions,
}

impl BarChart {
    /// Bars along `bar`, sized by `value` (one column or several)
    pub fn new(bar: impl Into<ChannelArg>, value: impl Into<SeriesArg>) -> Self {
        Self {
            bar: bar.into(),
            value: value.into(),
            color: None,
            opacity: None,
            group: None,
            stack: Stack::default(),
            direction: Direction::default(),
            options: ChartOptions::new(Some(LegendOrient::Bottom), PanZoom::Off, false),
        }
    }

    /// Color by a column or use a literal color
    ///
    /// After a reshape, `"value"` refers to the series-name column.
    pub fn with_color(mut self, color: impl Into<ChannelArg>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: impl Into<ChannelArg>) -> Self {
        self.opacity = Some(opacity.into());
        self
    }

    /// Group bars into facet columns
    ///
    /// After a reshape, grouping by `"value"` groups by series name.
    pub fn with_group(mut self, group: impl Into<GroupArg>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_stack(mut self, stack: impl Into<Stack>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Resolve the `"value"` alias to the series-name column of reshaped data
    fn resolve_alias<'a>(arg: &'a ChannelArg, reshaped: bool) -> std::borrow::Cow<'a, ChannelArg> {
        if reshaped && arg.is_name(SERIES_VALUE_COLUMN) {
            std::borrow::Cow::Owned(ChannelArg::from(SERIES_NAME_COLUMN))
        } else {
            std::borrow::Cow::Borrowed(arg)
        }
    }
}

impl ChartBuilder for BarChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn build(&self, df: &DataFrame) -> Result<Chart> {
        let options = &self.options;
        tracing::debug!(
            direction = ?self.direction,
            grouped = self.group.is_some(),
            "Building bar chart"
        );

        let mut x = normalize(df, &self.bar, opts([("title", Value::Null)]));
        let legend = legend_value(options.legend);
        let group = match &self.group {
            Some(GroupArg::By(group)) => Some(group),
            _ => None,
        };
        let keep = [self.color.as_ref(), group, self.opacity.as_ref()];
        let reshaped = reshape(df, Some(&self.bar), &self.value, &legend, &keep)?;
        let data = reshaped.data;

        let color = match &self.color {
            Some(color) => {
                let color = Self::resolve_alias(color, reshaped.reshaped);
                Some(normalize(&data, &color, opts([("legend", legend)])))
            }
            None => reshaped.series,
        };

        let mut column: Option<Encoding> = match &self.group {
            None => None,
            Some(GroupArg::Series) => {
                let Some(series) = color.clone().filter(|_| reshaped.reshaped) else {
                    return Err(VegaplotError::ConfigurationError(
                        "Grouping by series requires several value columns".to_string(),
                    ));
                };
                Some(std::mem::replace(&mut x, series))
            }
            Some(GroupArg::By(group)) => {
                let group = Self::resolve_alias(group, reshaped.reshaped);
                Some(normalize(&data, &group, opts([("title", Value::Null)])))
            }
        };
        if let Some(column) = column.as_mut() {
            column.set("spacing", json!(GROUP_SPACING));
        }

        let mut y = reshaped.value;
        y.set("stack", self.stack.to_json());

        let mut encoding = Encodings {
            x: Some(x),
            y: Some(y),
            color,
            opacity: normalize_opt(&data, self.opacity.as_ref(), ChannelOptions::new()),
            column,
            ..Default::default()
        };

        let horizontal = self.direction == Direction::Horizontal;
        if horizontal {
            encoding.flip();
        }

        let plot = PlotView::new(Mark::new(MarkType::Bar), encoding);
        let spec = assemble(data, View::Plot(plot), options);
        let spec = if horizontal {
            with_minimap(spec, options, &[Channel::Y], MinimapLocation::Right, true)?
        } else {
            with_minimap(spec, options, &[Channel::X], MinimapLocation::Top, true)?
        };

        Ok(Chart::new(spec, options.use_container_width || horizontal))
    }
}
