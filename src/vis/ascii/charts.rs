//! Chart implementations for text-based visualization

use super::{Chart, ChartConfig};
use crate::vis::spec::{BarChartSpec, BubbleMapSpec};

// ============================================================================
// Grouped Bar Chart
// ============================================================================

/// Grouped bar chart: one block of bars per category, one bar per series
#[derive(Debug, Clone)]
pub struct GroupedBarChart<'a> {
    spec: &'a BarChartSpec,
    config: ChartConfig,
}

impl<'a> GroupedBarChart<'a> {
    pub fn new(spec: &'a BarChartSpec) -> Self {
        Self::with_config(spec, ChartConfig::default())
    }

    pub fn with_config(spec: &'a BarChartSpec, config: ChartConfig) -> Self {
        Self { spec, config }
    }

    fn bar_width(&self) -> usize {
        self.config
            .width
            .saturating_sub(self.config.label_width + 14)
            .max(1)
    }

    fn legend(&self) -> String {
        let marks = self.config.style.series_marks();
        let entries: Vec<String> = self
            .spec
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", marks[i % marks.len()], s.name))
            .collect();
        format!("{}: {}\n", self.spec.legend_label, entries.join("  "))
    }
}

impl Chart for GroupedBarChart<'_> {
    fn render(&self) -> String {
        if self.spec.categories.is_empty() || self.spec.series.is_empty() {
            return String::from("No data to display\n");
        }

        let mut output = self.legend();
        let max_val = self.spec.max_value();
        let bar_width = self.bar_width();
        let label_width = self.config.label_width;
        let marks = self.config.style.series_marks();
        let axis = self.config.style.axis_char();

        for (c, category) in self.spec.categories.iter().enumerate() {
            let truncated: String = category.chars().take(label_width + 2).collect();
            output.push_str(&format!("{}\n", truncated));

            for (s, series) in self.spec.series.iter().enumerate() {
                let value = series.values.get(c).copied().unwrap_or(0.0);
                let bar_len = if max_val > 0.0 && value.is_finite() {
                    (value / max_val * bar_width as f64).round() as usize
                } else {
                    0
                };
                let bar: String = std::iter::repeat(marks[s % marks.len()])
                    .take(bar_len)
                    .collect();
                let name: String = series.name.chars().take(label_width).collect();

                if self.config.show_values {
                    output.push_str(&format!(
                        "  {:>label_width$} {}{:<bar_width$}{} {}\n",
                        name,
                        axis,
                        bar,
                        axis,
                        format_value(value),
                        label_width = label_width,
                        bar_width = bar_width
                    ));
                } else {
                    output.push_str(&format!(
                        "  {:>label_width$} {}{:<bar_width$}{}\n",
                        name,
                        axis,
                        bar,
                        axis,
                        label_width = label_width,
                        bar_width = bar_width
                    ));
                }
            }
        }

        output.push_str(&format!(
            "({} by {})\n",
            self.spec.value_label, self.spec.category_label
        ));
        output
    }
}

// ============================================================================
// Bubble Table
// ============================================================================

/// Text stand-in for a bubble map: one line per bubble, largest first
#[derive(Debug, Clone)]
pub struct BubbleTable<'a> {
    spec: &'a BubbleMapSpec,
    config: ChartConfig,
}

impl<'a> BubbleTable<'a> {
    pub fn new(spec: &'a BubbleMapSpec) -> Self {
        Self::with_config(spec, ChartConfig::default())
    }

    pub fn with_config(spec: &'a BubbleMapSpec, config: ChartConfig) -> Self {
        Self { spec, config }
    }
}

impl Chart for BubbleTable<'_> {
    fn render(&self) -> String {
        if self.spec.bubbles.is_empty() {
            return String::from("No data to display\n");
        }

        let mut bubbles: Vec<_> = self.spec.bubbles.iter().collect();
        bubbles.sort_by(|a, b| {
            b.size
                .partial_cmp(&a.size)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let max_size = bubbles.iter().map(|b| b.size).fold(0.0, f64::max);
        let label_width = self.config.label_width;
        let bar_width = self.config.width.saturating_sub(label_width + 10).max(1);
        let bar_char = self.config.style.bar_char();
        let axis = self.config.style.axis_char();

        let mut output = String::new();
        for bubble in bubbles {
            let bar_len = if max_size > 0.0 {
                (bubble.size / max_size * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            let name: String = bubble.name.chars().take(label_width).collect();

            output.push_str(&format!(
                "{:>label_width$} {}{:<bar_width$}{} {} ({:.2}, {:.2})\n",
                name,
                axis,
                bar,
                axis,
                format_value(bubble.size),
                bubble.latitude,
                bubble.longitude,
                label_width = label_width,
                bar_width = bar_width
            ));

            if !bubble.hover.is_empty() {
                let details: Vec<String> = bubble
                    .hover
                    .iter()
                    .map(|h| format!("{}: {}", h.label, format_value(h.value)))
                    .collect();
                output.push_str(&format!(
                    "{:>label_width$}   {}\n",
                    "",
                    details.join(", "),
                    label_width = label_width
                ));
            }
        }

        output.push_str(&format!("(bubble size: {})\n", self.spec.size_label));
        output
    }
}

// Whole numbers without decimals, everything else with two
fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
