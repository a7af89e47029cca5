//! Output writer abstraction layer for vegaplot
//!
//! The writer module is the boundary to the rendering sink: it turns a built
//! [`ChartSpec`] and its [`SizingPolicy`] into whatever a renderer consumes.
//!
//! # Architecture
//!
//! All writers implement the `Writer` trait, which provides:
//! - Spec + sizing → Output conversion
//! - Validation for writer compatibility
//! - Format-specific rendering logic
//!
//! # Example
//!
//! ```rust,ignore
//! use vegaplot::chart::{ChartBuilder, ScatterChart};
//! use vegaplot::writer::{VegaLiteWriter, Writer};
//!
//! let chart = ScatterChart::new("x", "y").build(&df)?;
//! let json = VegaLiteWriter::new().render(&chart)?;
//! println!("{}", json);
//! ```

use crate::chart::Chart;
use crate::plot::{ChartSpec, SizingPolicy, View};
use crate::{Result, VegaplotError};

pub mod vegalite;

pub use vegalite::VegaLiteWriter;

/// Trait for visualization output writers
///
/// # Associated Types
///
/// * `Output` - The type returned by `write()` and `render()`, e.g. `String`
///   for JSON text.
pub trait Writer {
    /// The output type produced by this writer.
    type Output;

    /// Generate output from a chart specification
    ///
    /// `sizing.use_container_width`, when set, takes precedence over any
    /// explicit width in the spec.
    ///
    /// # Errors
    ///
    /// Returns `VegaplotError::WriterError` if the spec is incompatible with
    /// this writer or output generation fails.
    fn write(&self, spec: &ChartSpec, sizing: SizingPolicy) -> Result<Self::Output>;

    /// Validate that a spec is compatible with this writer
    ///
    /// The default implementation rejects view trees with empty layers or
    /// concatenations, which no renderer can draw.
    fn validate(&self, spec: &ChartSpec) -> Result<()> {
        validate_view(&spec.view)
    }

    /// Render a built chart
    ///
    /// This is the main entry point for generating visualization output.
    fn render(&self, chart: &Chart) -> Result<Self::Output> {
        self.write(&chart.spec, chart.sizing)
    }
}

fn validate_view(view: &View) -> Result<()> {
    match view {
        View::Plot(_) => Ok(()),
        View::Layer(layer) if layer.layer.is_empty() => Err(VegaplotError::WriterError(
            "Layered view has no layers".to_string(),
        )),
        View::Layer(_) => Ok(()),
        View::HConcat { hconcat: views } | View::VConcat { vconcat: views } => {
            if views.is_empty() {
                return Err(VegaplotError::WriterError(
                    "Concatenated view has no children".to_string(),
                ));
            }
            views.iter().try_for_each(validate_view)
        }
    }
}
