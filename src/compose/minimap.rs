//! Minimap composition
//!
//! A minimap is a miniature copy of a chart's base plot carrying an interval
//! brush. The full-size primary view is linked to the brush either through
//! its scale domains (continuous charts: brushing pans and zooms) or through
//! a filter transform (bar charts: brushing selects which bars are drawn).

use crate::encoding::Channel;
use crate::naming::{BRUSH_SELECTION, DEFAULT_CHART_SIZE, MINI_CHART_SIZE};
use crate::plot::{ChartSpec, MinimapLocation, PlotView, Selection, Selections, Transform, View};
use crate::{Result, VegaplotError};

/// Derive the minimap view from a chart's base plot
///
/// `base` must carry the size of the view it was taken from. Brushing over
/// two channels makes a 2-D minimap at half the chart's size.
pub fn derive_minimap(
    base: &PlotView,
    channels: &[Channel],
    location: MinimapLocation,
    filter: bool,
) -> PlotView {
    let mut mini = base.clone();
    let two_d = channels.len() == 2;

    match location {
        MinimapLocation::Top | MinimapLocation::Bottom => {
            if !two_d {
                mini.height = Some(MINI_CHART_SIZE);
            }
            suppress_chrome(&mut mini, Channel::Y);
        }
        MinimapLocation::Right => {
            if !two_d {
                mini.width = Some(MINI_CHART_SIZE);
            }
            mini.height = Some(MINI_CHART_SIZE * 5);
            suppress_chrome(&mut mini, Channel::X);
        }
    }

    if filter {
        suppress_chrome(&mut mini, Channel::X);
        suppress_chrome(&mut mini, Channel::Y);
    }

    if two_d {
        mini.width = Some(mini.width.unwrap_or(DEFAULT_CHART_SIZE) / 2);
        mini.height = Some(mini.height.unwrap_or(DEFAULT_CHART_SIZE) / 2);
        suppress_chrome(&mut mini, Channel::X);
        suppress_chrome(&mut mini, Channel::Y);
    }

    let mut selection = Selections::new();
    selection.insert(BRUSH_SELECTION.to_string(), Selection::brush(channels));
    mini.selection = Some(selection);
    mini
}

fn suppress_chrome(plot: &mut PlotView, channel: Channel) {
    if let Some(encoding) = plot.encoding.get_mut(channel) {
        encoding.suppress_chrome();
    }
}

/// Link the primary plot to the minimap brush
fn link_primary(primary: &mut PlotView, channels: &[Channel], filter: bool) {
    if filter {
        primary.transform.push(Transform::filter_by(BRUSH_SELECTION));
        return;
    }
    for &channel in channels {
        if let Some(encoding) = primary.encoding.get_mut(channel) {
            encoding.link_domain(BRUSH_SELECTION, channel);
            encoding.suppress_title();
        }
    }
}

/// Attach a minimap to a built chart
///
/// Returns a new spec; `spec` itself is left untouched. The primary view
/// keeps any annotation layers; the minimap is derived from the base plot
/// alone.
///
/// # Errors
///
/// `ConfigurationError` if the chart is already a concatenation.
pub fn attach_minimap(
    spec: &ChartSpec,
    channels: &[Channel],
    location: MinimapLocation,
    filter: bool,
) -> Result<ChartSpec> {
    let mut primary = spec.view.clone();
    let (width, height) = primary.size();

    let base = primary.base_plot_mut().ok_or_else(|| {
        VegaplotError::ConfigurationError(
            "A minimap can only be attached to a single or layered view".to_string(),
        )
    })?;
    let mini = derive_minimap(
        &base.clone().with_size(width, height),
        channels,
        location,
        filter,
    );
    link_primary(base, channels, filter);

    tracing::debug!(
        channels = ?channels,
        location = ?location,
        filter,
        "Attaching minimap"
    );

    let mini = View::Plot(mini);
    let view = match location {
        MinimapLocation::Right => View::HConcat {
            hconcat: vec![primary, mini],
        },
        MinimapLocation::Top => View::VConcat {
            vconcat: vec![mini, primary],
        },
        MinimapLocation::Bottom => View::VConcat {
            vconcat: vec![primary, mini],
        },
    };

    Ok(ChartSpec {
        meta: spec.meta.clone(),
        view,
    })
}
