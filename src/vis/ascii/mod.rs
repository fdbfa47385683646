//! Text-based chart rendering
//!
//! Draws chart specs with ASCII or Unicode block characters so the dashboard
//! can be viewed in a terminal.

mod charts;

use serde::{Deserialize, Serialize};

pub use charts::{BubbleTable, GroupedBarChart};

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;
}

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in characters
    pub width: usize,
    /// Max label width
    pub label_width: usize,
    /// Show values after bars
    pub show_values: bool,
    /// Character set
    pub style: ChartStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            label_width: 20,
            show_values: true,
            style: ChartStyle::Unicode,
        }
    }
}

/// Chart style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    /// Simple ASCII characters
    Ascii,
    /// Unicode block characters
    #[default]
    Unicode,
}

impl ChartStyle {
    fn bar_char(&self) -> char {
        match self {
            ChartStyle::Ascii => '#',
            ChartStyle::Unicode => '█',
        }
    }

    fn axis_char(&self) -> char {
        match self {
            ChartStyle::Ascii => '|',
            ChartStyle::Unicode => '│',
        }
    }

    /// Glyphs used to mark series in a legend, cycled by series index
    fn series_marks(&self) -> &'static [char] {
        match self {
            ChartStyle::Ascii => &['#', '=', '+', '*', '%', '@'],
            ChartStyle::Unicode => &['█', '▓', '▒', '░', '▞', '▚'],
        }
    }
}
