//! Centralized naming conventions for vegaplot-generated identifiers.
//!
//! Everything the builders invent on the caller's behalf lives here: the
//! columns produced when a wide table is reshaped into long format, the names
//! of interactive selections, and the fixed pixel sizes used for auxiliary
//! views.
//!
//! # Categories
//!
//! - **Reshape columns**: series-name and series-value columns added by the
//!   wide-to-long reshape (`variable`, `value`). These are singular on purpose
//!   so that tooltips read naturally.
//! - **Selections**: the scale-bound pan/zoom selection and the minimap brush.
//! - **Sizes**: minimap thickness and the renderer's implicit chart height.

/// Column holding the original series (column) name after a reshape.
pub const SERIES_NAME_COLUMN: &str = "variable";

/// Column holding the series value after a reshape.
pub const SERIES_VALUE_COLUMN: &str = "value";

/// Both reserved reshape columns, checked before any reshape.
pub const RESERVED_COLUMNS: [&str; 2] = [SERIES_NAME_COLUMN, SERIES_VALUE_COLUMN];

/// Name of the interval selection bound to scales for pan/zoom.
pub const PAN_ZOOM_SELECTION: &str = "pan_zoom";

/// Name of the interval selection drawn on a minimap.
pub const BRUSH_SELECTION: &str = "brush";

/// Thickness in pixels of a minimap or marginal histogram.
pub const MINI_CHART_SIZE: u32 = 50;

/// Height the renderer uses when a chart does not set one.
pub const DEFAULT_CHART_SIZE: u32 = 200;

/// Spacing in pixels between facet cells of a grouped bar chart.
pub const GROUP_SPACING: u32 = 10;

/// Check whether a column name is reserved for reshape output.
pub fn is_reserved_column(name: &str) -> bool {
    RESERVED_COLUMNS.contains(&name)
}
