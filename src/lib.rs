/*!
# vegaplot - Vega-Lite charts from DataFrames

Builds complete Vega-Lite specifications from a polars [`DataFrame`] and a
handful of semantic parameters: which column goes on which axis, which one
drives color, whether to stack, whether the chart can be panned and zoomed.

## Example

```rust,ignore
use vegaplot::chart::{ChartBuilder, LineChart};
use vegaplot::writer::{VegaLiteWriter, Writer};

let chart = LineChart::new("date:T", ["revenue", "costs"])
    .with_title("Revenue vs costs")
    .build(&df)?;

let json = VegaLiteWriter::new().render(&chart)?;
```

## Architecture

A chart is built in one synchronous pass:
- **Normalization** → every channel argument (column name, shorthand such as
  `"date:T"`, literal, custom object) becomes a canonical encoding
- **Reshaping** → several value columns are melted into long format with
  generated series-name/series-value columns
- **Composition** → a per-family builder assembles the plot view, then
  annotation layers, minimaps and marginal histograms are composed around it
- **Output** → a [`writer::Writer`] turns the spec into renderer input

## Core Components

- [`encoding`] - channel arguments, type inference, normalization
- [`reshape`] - wide to long reshaping
- [`plot`] - chart spec types and shared options
- [`chart`] - per-family chart builders
- [`compose`] - annotation layers, minimaps, marginal histograms
- [`writer`] - output format abstraction layer
*/

pub mod chart;
pub mod compose;
pub mod encoding;
pub mod naming;
pub mod plot;
pub mod reshape;
pub mod writer;

// Re-export key types for convenience
pub use chart::{Chart, ChartBuilder};
pub use encoding::{Channel, ChannelArg, Encoding, Encodings, FieldType, SeriesArg};
pub use plot::{ChartOptions, ChartSpec, PlotView, SizingPolicy, View};

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum VegaplotError {
    #[error("Name collision: data already contains a column called '{0}'")]
    NameCollision(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),
}

pub type Result<T> = std::result::Result<T, VegaplotError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::chart::{
        AreaChart, BarChart, DonutChart, EventChart, Histogram, LineChart, PieChart,
        ScatterChart, ScatterHistogram, TimeHistogram, XyHistogram,
    };
    use crate::plot::{Annotation, Direction, GroupArg, PanZoom, Stack};
    use crate::writer::{VegaLiteWriter, Writer};
    use polars::prelude::*;
    use serde_json::{json, Value};

    fn wide_frame() -> DataFrame {
        df! {
            "a" => &[1, 2, 3],
            "b" => &[10, 20, 30],
            "c" => &[5, 15, 25],
        }
        .unwrap()
    }

    fn render(chart: &Chart) -> Value {
        let json_str = VegaLiteWriter::new().render(chart).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_end_to_end_multi_series_line() {
        let chart = LineChart::new("a", ["b", "c"]).build(&wide_frame()).unwrap();

        let data = chart.spec.meta.data.as_ref().unwrap();
        assert_eq!(data.height(), 6);

        let vl_spec = render(&chart);
        assert_eq!(vl_spec["encoding"]["x"]["field"], "a");
        assert_eq!(vl_spec["encoding"]["y"]["field"], naming::SERIES_VALUE_COLUMN);
        assert_eq!(vl_spec["encoding"]["color"]["field"], naming::SERIES_NAME_COLUMN);
        assert_eq!(vl_spec["data"]["values"].as_array().unwrap().len(), 6);
        assert_eq!(vl_spec["data"]["values"][0]["variable"], "b");
        assert_eq!(vl_spec["data"]["values"][3]["variable"], "c");
        assert_eq!(vl_spec["data"]["values"][3]["value"], 5);
    }

    #[test]
    fn test_end_to_end_single_series_keeps_data() {
        let df = wide_frame();
        let chart = LineChart::new("a", "b").build(&df).unwrap();
        assert!(chart.spec.meta.data.as_ref().unwrap().equals(&df));

        let vl_spec = render(&chart);
        assert_eq!(vl_spec["encoding"]["y"]["field"], "b");
        assert_eq!(vl_spec["encoding"]["y"]["type"], "quantitative");
        assert!(vl_spec["encoding"].get("color").is_none());
    }

    #[test]
    fn test_end_to_end_reshape_collision() {
        let df = df! {
            "a" => &[1, 2],
            "variable" => &[3, 4],
            "c" => &[5, 6],
        }
        .unwrap();
        let result = LineChart::new("a", ["variable", "c"]).build(&df);
        assert!(matches!(result, Err(VegaplotError::NameCollision(name)) if name == "variable"));
    }

    #[test]
    fn test_end_to_end_line_pan_zoom_and_sizing() {
        let chart = LineChart::new("a", "b")
            .with_pan_zoom(PanZoom::Pan)
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        assert_eq!(
            vl_spec["selection"][naming::PAN_ZOOM_SELECTION],
            json!({"type": "interval", "bind": "scales", "zoom": false})
        );
        assert_eq!(vl_spec["width"], "container");
        assert_eq!(vl_spec["mark"], json!({"type": "line", "tooltip": true}));
    }

    #[test]
    fn test_end_to_end_area_stacking() {
        let chart = AreaChart::new("a", ["b", "c"])
            .with_stack(Stack::from("normalize"))
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        assert_eq!(vl_spec["mark"]["type"], "area");
        assert_eq!(vl_spec["encoding"]["y"]["stack"], "normalize");
        assert_eq!(vl_spec["encoding"]["y"]["title"], Value::Null);
    }

    #[test]
    fn test_end_to_end_line_minimap() {
        let chart = LineChart::new("a", "b")
            .with_pan_zoom(PanZoom::Minimap)
            .with_height(300)
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        let views = vl_spec["vconcat"].as_array().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0]["height"], 300);
        assert_eq!(
            views[0]["encoding"]["x"]["scale"]["domain"],
            json!({"selection": "brush", "encoding": "x"})
        );
        assert_eq!(views[1]["height"], naming::MINI_CHART_SIZE);
        assert_eq!(
            views[1]["selection"]["brush"],
            json!({"type": "interval", "encodings": ["x"]})
        );
        assert!(vl_spec["data"]["values"].is_array());
        // Concatenated specs are never forced to container width
        assert!(vl_spec.get("width").is_none());
    }

    #[test]
    fn test_end_to_end_annotations() {
        let chart = LineChart::new("a", "b")
            .with_x_annotations([Annotation::labeled(2, "launch")])
            .with_y_annotations([Annotation::at(15), Annotation::at(25)])
            .with_width(400)
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        let layers = vl_spec["layer"].as_array().unwrap();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0]["mark"]["type"], "line");
        assert_eq!(layers[1]["mark"], json!({"type": "rule"}));
        assert_eq!(layers[1]["encoding"]["x"], json!({"datum": 2}));
        assert_eq!(
            layers[1]["encoding"]["tooltip"],
            json!({"value": "launch (2)"})
        );
        assert_eq!(layers[2]["encoding"]["y"], json!({"datum": 15}));
        assert_eq!(layers[3]["encoding"]["tooltip"], json!({"value": "(25)"}));
        assert_eq!(vl_spec["width"], "container");
    }

    #[test]
    fn test_end_to_end_grouped_bar() {
        let chart = BarChart::new("a", ["b", "c"])
            .with_group(GroupArg::Series)
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        assert_eq!(vl_spec["mark"]["type"], "bar");
        assert_eq!(vl_spec["encoding"]["column"]["field"], "a");
        assert_eq!(vl_spec["encoding"]["column"]["spacing"], 10);
        assert_eq!(vl_spec["encoding"]["x"]["field"], naming::SERIES_NAME_COLUMN);
        assert_eq!(vl_spec["encoding"]["y"]["stack"], "zero");
        // Vertical bars keep their explicit width
        assert!(vl_spec.get("width").is_none());
    }

    #[test]
    fn test_end_to_end_horizontal_bar_forces_container_width() {
        let chart = BarChart::new("a", "b")
            .with_direction(Direction::Horizontal)
            .build(&wide_frame())
            .unwrap();
        assert!(chart.sizing.use_container_width);
        let vl_spec = render(&chart);
        assert_eq!(vl_spec["encoding"]["y"]["field"], "a");
        assert_eq!(vl_spec["encoding"]["x"]["field"], "b");
        assert_eq!(vl_spec["width"], "container");
    }

    #[test]
    fn test_end_to_end_bar_minimap_filters() {
        let chart = BarChart::new("a", "b")
            .with_pan_zoom(PanZoom::Minimap)
            .build(&wide_frame())
            .unwrap();
        let vl_spec = render(&chart);
        let views = vl_spec["vconcat"].as_array().unwrap();
        // Vertical bars put the minimap on top
        assert_eq!(views[0]["selection"]["brush"]["encodings"], json!(["x"]));
        assert_eq!(
            views[1]["transform"],
            json!([{"filter": {"selection": "brush"}}])
        );
    }

    #[test]
    fn test_end_to_end_scatter() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0],
            "y" => &[3.0, 1.0, 2.0],
            "kind" => &["a", "b", "a"],
        }
        .unwrap();
        let chart = ScatterChart::new("x", "y")
            .with_color("kind")
            .with_size(40)
            .build(&df)
            .unwrap();
        let vl_spec = render(&chart);
        assert_eq!(vl_spec["mark"]["type"], "circle");
        assert_eq!(vl_spec["encoding"]["color"]["field"], "kind");
        assert_eq!(vl_spec["encoding"]["color"]["legend"], json!({"orient": "right"}));
        assert_eq!(vl_spec["encoding"]["size"]["value"], 40);
    }

    #[test]
    fn test_end_to_end_pie_and_donut() {
        let df = df! {
            "share" => &[30, 70],
            "slice" => &["a", "b"],
        }
        .unwrap();
        let pie = render(&PieChart::new("share", "slice").build(&df).unwrap());
        assert_eq!(pie["mark"], json!({"type": "arc", "tooltip": true}));
        assert_eq!(pie["view"], json!({"stroke": null}));
        assert_eq!(pie["encoding"]["color"]["title"], Value::Null);

        let donut = render(
            &DonutChart::new("share", "slice")
                .with_height(80)
                .build(&df)
                .unwrap(),
        );
        assert_eq!(donut["mark"]["innerRadius"], 20);
        assert_eq!(donut["height"], 80);
    }

    #[test]
    fn test_end_to_end_event_chart() {
        let df = df! {
            "t" => &[1, 2, 3],
            "lane" => &["a", "b", "a"],
        }
        .unwrap();
        let vl_spec = render(&EventChart::new("t", "lane").build(&df).unwrap());
        assert_eq!(
            vl_spec["mark"],
            json!({"type": "tick", "tooltip": true, "thickness": 2.0})
        );
        assert_eq!(vl_spec["encoding"]["opacity"]["value"], 0.5);
        assert_eq!(vl_spec["encoding"]["y"]["type"], "nominal");
    }

    #[test]
    fn test_end_to_end_histograms() {
        let df = df! {
            "x" => &[1.0, 2.0, 2.5, 3.0],
            "y" => &[1.0, 1.5, 2.0, 4.0],
        }
        .unwrap();

        let hist = render(&Histogram::new("x").build(&df).unwrap());
        assert_eq!(hist["mark"]["type"], "bar");
        assert_eq!(hist["encoding"]["x"]["bin"], true);
        assert_eq!(hist["encoding"]["y"], json!({"aggregate": "count"}));

        let xy = render(&XyHistogram::new("x", "y").build(&df).unwrap());
        assert_eq!(xy["mark"]["type"], "rect");
        assert_eq!(xy["encoding"]["x"]["bin"], true);
        assert_eq!(xy["encoding"]["y"]["bin"], true);
        assert_eq!(xy["encoding"]["color"]["aggregate"], "count");
    }

    #[test]
    fn test_end_to_end_time_histogram() {
        let date = Column::new("when".into(), &[0i64, 3_600_000, 7_200_000])
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
            .unwrap();
        let df = DataFrame::new(vec![date]).unwrap();
        let vl_spec = render(
            &TimeHistogram::new("when", "hours", "day")
                .build(&df)
                .unwrap(),
        );
        assert_eq!(vl_spec["encoding"]["x"]["timeUnit"], "hours");
        assert_eq!(vl_spec["encoding"]["y"]["timeUnit"], "day");
        assert_eq!(vl_spec["encoding"]["y"]["type"], "ordinal");
        assert_eq!(vl_spec["encoding"]["color"]["aggregate"], "count");
        assert_eq!(
            vl_spec["data"]["values"][1]["when"],
            "1970-01-01T01:00:00.000Z"
        );
    }

    #[test]
    fn test_end_to_end_scatter_histogram() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0],
            "y" => &[3.0, 1.0, 2.0],
        }
        .unwrap();
        let vl_spec = render(
            &ScatterHistogram::new("x", "y")
                .with_title("Joint")
                .build(&df)
                .unwrap(),
        );
        assert_eq!(vl_spec["title"], "Joint");
        let rows = vl_spec["vconcat"].as_array().unwrap();
        assert_eq!(rows[0]["mark"]["type"], "bar");
        assert_eq!(rows[0]["height"], naming::MINI_CHART_SIZE);
        let cols = rows[1]["hconcat"].as_array().unwrap();
        assert_eq!(cols[0]["mark"]["type"], "circle");
        assert_eq!(cols[1]["width"], naming::MINI_CHART_SIZE);
        assert_eq!(cols[1]["encoding"]["y"]["bin"], true);
    }
}
