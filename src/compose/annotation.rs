//! Annotation layers
//!
//! Marker lines at fixed data coordinates are drawn as extra `rule` layers on
//! top of the base plot, all x-annotations first, then all y-annotations.

use crate::encoding::{Channel, Encoding, Encodings};
use crate::plot::{Annotation, Annotations, LayerView, Mark, PlotView, View};
use serde_json::json;

/// Rule layer positioned at one annotation coordinate
pub fn annotation_layer(channel: Channel, annotation: &Annotation) -> PlotView {
    let mut encoding = Encodings {
        tooltip: Some(Encoding::literal(json!(annotation.tooltip()))),
        ..Default::default()
    };
    let position = Some(Encoding::datum(annotation.coord.clone()));
    match channel {
        Channel::Y => encoding.y = position,
        _ => encoding.x = position,
    }
    PlotView::new(Mark::rule(), encoding)
}

/// Wrap a plot into a layer view with one rule layer per annotation
///
/// Without annotations the plot is returned unwrapped.
pub fn add_annotations(plot: PlotView, annotations: &Annotations) -> View {
    if annotations.is_empty() {
        return View::Plot(plot);
    }

    let rules = annotations
        .x
        .iter()
        .map(|a| annotation_layer(Channel::X, a))
        .chain(annotations.y.iter().map(|a| annotation_layer(Channel::Y, a)));

    tracing::trace!(
        x = annotations.x.len(),
        y = annotations.y.len(),
        "Adding annotation layers"
    );

    View::Layer(LayerView {
        layer: std::iter::once(plot).chain(rules).collect(),
        width: None,
        height: None,
    })
}
