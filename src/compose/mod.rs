//! Auxiliary view composition
//!
//! Views derived from an already-built plot and arranged around it:
//! annotation rule layers, pan/zoom minimaps and marginal histograms. Every
//! function here takes its input by reference or by value and returns a new
//! view; nothing reaches back into the caller's spec.

pub mod annotation;
pub mod marginal;
pub mod minimap;

pub use annotation::{add_annotations, annotation_layer};
pub use marginal::{with_marginals, x_histogram, y_histogram, MarginalSettings};
pub use minimap::{attach_minimap, derive_minimap};
