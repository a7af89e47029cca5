//! Chart builders
//!
//! One builder per chart family. A builder holds the channel arguments and
//! options for one chart and turns them into a [`Chart`] against a dataset:
//!
//! ```rust,ignore
//! use vegaplot::chart::{BarChart, ChartBuilder};
//! use vegaplot::plot::{Direction, GroupArg};
//!
//! let chart = BarChart::new("company", ["q2", "q3"])
//!     .with_group(GroupArg::Series)
//!     .with_direction(Direction::Horizontal)
//!     .build(&df)?;
//! ```
//!
//! Building never mutates the dataset. When several value columns are
//! requested the chart carries its own long-format copy.

pub mod bar;
pub mod event;
pub mod histogram;
pub mod line;
pub mod pie;
pub mod scatter;
pub mod scatter_hist;

pub use bar::BarChart;
pub use event::EventChart;
pub use histogram::{Histogram, TimeHistogram, XyHistogram};
pub use line::{AreaChart, LineChart};
pub use pie::{DonutChart, PieChart};
pub use scatter::ScatterChart;
pub use scatter_hist::ScatterHistogram;

use crate::compose::attach_minimap;
use crate::encoding::Channel;
use crate::naming::PAN_ZOOM_SELECTION;
use crate::plot::{
    ChartOptions, ChartSpec, LegendOrient, Meta, MinimapLocation, PanZoom, Selection, Selections,
    SizingPolicy, View,
};
use crate::{DataFrame, Result};

/// A built chart: the spec plus how the renderer should size it
#[derive(Debug, Clone)]
pub struct Chart {
    pub spec: ChartSpec,
    pub sizing: SizingPolicy,
}

impl Chart {
    pub fn new(spec: ChartSpec, use_container_width: bool) -> Self {
        Self {
            spec,
            sizing: SizingPolicy {
                use_container_width,
            },
        }
    }
}

/// Shared interface of all chart builders
///
/// Implementors expose their [`ChartOptions`]; the cosmetic `with_*` methods
/// come for free.
pub trait ChartBuilder: Sized {
    fn options(&self) -> &ChartOptions;

    fn options_mut(&mut self) -> &mut ChartOptions;

    /// Build the chart against a dataset
    ///
    /// # Errors
    ///
    /// - `NameCollision` if the data must be reshaped and already has a
    ///   reserved column
    /// - `ConfigurationError` for invalid option combinations
    /// - `DataError` if a requested value column does not exist
    fn build(&self, df: &DataFrame) -> Result<Chart>;

    /// Chart width in pixels
    fn with_width(mut self, width: u32) -> Self {
        self.options_mut().width = Some(width);
        self
    }

    /// Chart height in pixels
    fn with_height(mut self, height: u32) -> Self {
        self.options_mut().height = Some(height);
        self
    }

    fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options_mut().title = Some(title.into());
        self
    }

    /// Legend placement, `None` hides the legend
    fn with_legend(mut self, legend: Option<LegendOrient>) -> Self {
        self.options_mut().legend = legend;
        self
    }

    fn with_pan_zoom(mut self, pan_zoom: PanZoom) -> Self {
        self.options_mut().pan_zoom = pan_zoom;
        self
    }

    fn with_container_width(mut self, use_container_width: bool) -> Self {
        self.options_mut().use_container_width = use_container_width;
        self
    }

    /// Replace all options at once, e.g. with options loaded from JSON
    fn with_options(mut self, options: ChartOptions) -> Self {
        *self.options_mut() = options;
        self
    }
}

/// Scale-bound interval selection for a pan/zoom mode
///
/// Minimap and static charts get no scale-bound selection.
pub fn pan_zoom_selection(pan_zoom: PanZoom) -> Option<Selections> {
    let selection = match pan_zoom {
        PanZoom::Both => Selection::scales(),
        PanZoom::Pan => Selection {
            zoom: Some(false),
            ..Selection::scales()
        },
        PanZoom::Zoom => Selection {
            translate: Some(false),
            ..Selection::scales()
        },
        PanZoom::Minimap | PanZoom::Off => return None,
    };
    let mut selections = Selections::new();
    selections.insert(PAN_ZOOM_SELECTION.to_string(), selection);
    Some(selections)
}

/// Attach data, title and size to a built view
pub(crate) fn assemble(data: DataFrame, mut view: View, options: &ChartOptions) -> ChartSpec {
    view.set_size(options.width, options.height);
    ChartSpec {
        meta: Meta {
            data: Some(data),
            title: options.title.clone(),
            view_config: None,
        },
        view,
    }
}

/// Attach a minimap when the options ask for one
pub(crate) fn with_minimap(
    spec: ChartSpec,
    options: &ChartOptions,
    channels: &[Channel],
    location: MinimapLocation,
    filter: bool,
) -> Result<ChartSpec> {
    if options.pan_zoom == PanZoom::Minimap {
        attach_minimap(&spec, channels, location, filter)
    } else {
        Ok(spec)
    }
}
