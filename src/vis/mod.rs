//! Chart specifications and their renderers
//!
//! - `spec`: serializable chart descriptions bound from derived tables
//! - `ascii`: terminal rendering with ASCII/Unicode characters
//! - `plotters_ext`: SVG rendering (requires the `visualization` feature)

pub mod ascii;
#[cfg(feature = "visualization")]
pub mod plotters_ext;
pub mod spec;

pub use self::ascii::{BubbleTable, Chart, ChartConfig, ChartStyle, GroupedBarChart};
#[cfg(feature = "visualization")]
pub use self::plotters_ext::{bar_chart_svg, PlotSettings};
pub use self::spec::{
    BarChartSpec, BarOrientation, BarSeries, Bubble, BubbleMapSpec, ChartSpec, HoverField,
};
