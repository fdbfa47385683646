//! Serializable chart specifications
//!
//! A chart spec carries everything a client needs to draw one chart: the
//! category axis, the series, axis labels and the theme.

use serde::Serialize;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

/// Direction of the bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarOrientation {
    /// Categories on x, values on y
    Vertical,
    /// Categories on y, values on x
    Horizontal,
}

/// One bar series; `values[i]` belongs to `categories[i]` of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Grouped bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub orientation: BarOrientation,
    /// Always "group": series are drawn side by side
    pub barmode: &'static str,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub category_label: String,
    pub value_label: String,
    pub legend_label: String,
    pub template: String,
}

impl BarChartSpec {
    /// Build from a wide table: one category column and one column per series
    pub fn from_wide(df: &DataFrame, category: &str, value_columns: &[&str]) -> Result<Self> {
        let categories = df.get_column_string_values(category)?;
        let series = value_columns
            .iter()
            .map(|name| {
                Ok(BarSeries {
                    name: name.to_string(),
                    values: df.get_column_numeric_values(name)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BarChartSpec {
            orientation: BarOrientation::Vertical,
            barmode: "group",
            categories,
            series,
            category_label: category.to_string(),
            value_label: "value".to_string(),
            legend_label: "variable".to_string(),
            template: String::new(),
        })
    }

    /// Build from a long table of (category, series, value) rows
    ///
    /// Categories keep their order of first appearance. Series follow
    /// `series_order`; series not named there come after it in order of
    /// appearance. Missing (category, series) cells are zero.
    pub fn from_long(
        df: &DataFrame,
        category: &str,
        series_column: &str,
        value: &str,
        series_order: &[&str],
    ) -> Result<Self> {
        let category_values = df.get_column_string_values(category)?;
        let series_values = df.get_column_string_values(series_column)?;
        let values = df.get_column_numeric_values(value)?;

        let categories = first_appearance(&category_values);
        let mut series_names: Vec<String> = series_order
            .iter()
            .filter(|name| series_values.iter().any(|v| v == *name))
            .map(|name| name.to_string())
            .collect();
        for name in first_appearance(&series_values) {
            if !series_names.contains(&name) {
                series_names.push(name);
            }
        }

        let mut series: Vec<BarSeries> = series_names
            .into_iter()
            .map(|name| BarSeries {
                name,
                values: vec![0.0; categories.len()],
            })
            .collect();

        for ((cat, ser), v) in category_values.iter().zip(&series_values).zip(values) {
            let c = categories.iter().position(|x| x == cat);
            let s = series.iter().position(|x| &x.name == ser);
            if let (Some(c), Some(s)) = (c, s) {
                series[s].values[c] += v;
            }
        }

        Ok(BarChartSpec {
            orientation: BarOrientation::Horizontal,
            barmode: "group",
            categories,
            series,
            category_label: category.to_string(),
            value_label: value.to_string(),
            legend_label: series_column.to_string(),
            template: String::new(),
        })
    }

    pub fn with_labels(mut self, category: &str, value: &str, legend: &str) -> Self {
        self.category_label = category.to_string();
        self.value_label = value.to_string();
        self.legend_label = legend.to_string();
        self
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    /// Largest value over all series, 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().cloned())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

fn first_appearance(values: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for v in values {
        if !seen.contains(v) {
            seen.push(v.clone());
        }
    }
    seen
}

/// One hover entry of a map bubble
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverField {
    pub label: String,
    pub value: f64,
}

/// One bubble on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub size: f64,
    pub hover: Vec<HoverField>,
}

/// Geographic bubble map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleMapSpec {
    pub map_style: String,
    pub zoom: u8,
    pub size_label: String,
    pub bubbles: Vec<Bubble>,
}

impl BubbleMapSpec {
    /// Build one bubble per row; latitude/longitude are not part of the hover
    pub fn from_table(
        df: &DataFrame,
        name: &str,
        latitude: &str,
        longitude: &str,
        size: &str,
        hover: &[&str],
    ) -> Result<Self> {
        let names = df.get_column_string_values(name)?;
        let lats = df.get_column_numeric_values(latitude)?;
        let lons = df.get_column_numeric_values(longitude)?;
        let sizes = df.get_column_numeric_values(size)?;
        let hover_values = hover
            .iter()
            .map(|h| df.get_column_numeric_values(h))
            .collect::<Result<Vec<_>>>()?;

        if sizes.iter().any(|s| *s < 0.0) {
            return Err(Error::Visualization(format!(
                "bubble sizes in '{}' must not be negative",
                size
            )));
        }

        let bubbles = (0..df.row_count())
            .map(|row| Bubble {
                name: names[row].clone(),
                latitude: lats[row],
                longitude: lons[row],
                size: sizes[row],
                hover: hover
                    .iter()
                    .zip(&hover_values)
                    .map(|(label, values)| HoverField {
                        label: label.to_string(),
                        value: values[row],
                    })
                    .collect(),
            })
            .collect();

        Ok(BubbleMapSpec {
            map_style: "carto-positron".to_string(),
            zoom: 3,
            size_label: size.to_string(),
            bubbles,
        })
    }

    pub fn with_style(mut self, style: &str, zoom: u8) -> Self {
        self.map_style = style.to_string();
        self.zoom = zoom;
        self
    }
}

/// Any chart the dashboard can show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChartSpec),
    BubbleMap(BubbleMapSpec),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    fn strings(values: &[&str]) -> Series<String> {
        Series::new(values.iter().map(|s| s.to_string()).collect(), None)
    }

    #[test]
    fn test_from_long_orders_series_and_categories() {
        let mut df = DataFrame::new();
        df.add_column("Profession", strings(&["Lawyer", "Doctor", "Doctor", "Lawyer"]))
            .unwrap();
        df.add_column("generation", strings(&["Gen. X", "Gen. X", "Boomers", "Boomers"]))
            .unwrap();
        df.add_column("num_people", Series::new(vec![0i64, 1, 2, 3], None))
            .unwrap();

        let spec = BarChartSpec::from_long(
            &df,
            "Profession",
            "generation",
            "num_people",
            &["Boomers", "Gen. X", "Gen. Y (Millenials)"],
        )
        .unwrap();

        assert_eq!(spec.orientation, BarOrientation::Horizontal);
        assert_eq!(spec.categories, vec!["Lawyer", "Doctor"]);
        let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Boomers", "Gen. X"]);
        assert_eq!(spec.series[0].values, vec![3.0, 2.0]);
        assert_eq!(spec.series[1].values, vec![0.0, 1.0]);
        assert_eq!(spec.max_value(), 3.0);
    }

    #[test]
    fn test_chart_spec_json_tag() {
        let mut df = DataFrame::new();
        df.add_column("generation", strings(&["Boomers"])).unwrap();
        df.add_column("Male", Series::new(vec![2i64], None)).unwrap();
        let spec = BarChartSpec::from_wide(&df, "generation", &["Male"])
            .unwrap()
            .with_template("plotly_dark");
        let json = serde_json::to_value(ChartSpec::Bar(spec)).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["orientation"], "vertical");
        assert_eq!(json["template"], "plotly_dark");
        assert_eq!(json["series"][0]["values"][0], 2.0);
    }
}
