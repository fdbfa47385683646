//! Plottersを使用したSVG出力
//!
//! 棒グラフの仕様をSVG文字列として描画する。`visualization` フィーチャーが必要。

use plotters::prelude::*;

use crate::error::Result;
use crate::vis::spec::{BarChartSpec, BarOrientation};

/// SVG出力の設定
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// タイトル
    pub title: String,
    /// グラフの幅（ピクセル）
    pub width: u32,
    /// グラフの高さ（ピクセル）
    pub height: u32,
    /// 凡例の表示
    pub show_legend: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            title: String::new(),
            width: 800,
            height: 600,
            show_legend: true,
        }
    }
}

/// グループ化棒グラフをSVGとして描画
pub fn bar_chart_svg(spec: &BarChartSpec, settings: &PlotSettings) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (settings.width, settings.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let n_categories = spec.categories.len().max(1);
        let n_series = spec.series.len().max(1);
        let value_max = (spec.max_value() * 1.1).max(1.0);
        let slot = 0.8 / n_series as f64;

        let categories = spec.categories.clone();
        let category_label = move |v: &f64| -> String {
            let i = v.floor();
            if i < 0.0 {
                return String::new();
            }
            categories.get(i as usize).cloned().unwrap_or_default()
        };

        // 各系列の棒: (系列番号, カテゴリ番号, 値)
        let bars = spec.series.iter().enumerate().flat_map(|(s, series)| {
            series
                .values
                .iter()
                .enumerate()
                .map(move |(c, &v)| (s, c, if v.is_finite() { v } else { 0.0 }))
        });

        match spec.orientation {
            BarOrientation::Vertical => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&settings.title, ("sans-serif", 20))
                    .margin(10)
                    .x_label_area_size(40)
                    .y_label_area_size(60)
                    .build_cartesian_2d(0f64..n_categories as f64, 0f64..value_max)?;

                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .x_labels(n_categories * 2)
                    .x_label_formatter(&category_label)
                    .x_desc(spec.category_label.as_str())
                    .y_desc(spec.value_label.as_str())
                    .draw()?;

                chart.draw_series(bars.map(|(s, c, v)| {
                    let x0 = c as f64 + 0.1 + s as f64 * slot;
                    Rectangle::new([(x0, 0.0), (x0 + slot, v)], Palette99::pick(s).filled())
                }))?;

                for (s, series) in spec.series.iter().enumerate() {
                    chart
                        .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                        .label(series.name.clone())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 10, y + 5)], Palette99::pick(s).filled())
                        });
                }

                if settings.show_legend {
                    chart
                        .configure_series_labels()
                        .background_style(&WHITE.mix(0.8))
                        .border_style(&BLACK)
                        .draw()?;
                }
            }
            BarOrientation::Horizontal => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&settings.title, ("sans-serif", 20))
                    .margin(10)
                    .x_label_area_size(40)
                    .y_label_area_size(120)
                    .build_cartesian_2d(0f64..value_max, 0f64..n_categories as f64)?;

                chart
                    .configure_mesh()
                    .disable_y_mesh()
                    .y_labels(n_categories * 2)
                    .y_label_formatter(&category_label)
                    .x_desc(spec.value_label.as_str())
                    .y_desc(spec.category_label.as_str())
                    .draw()?;

                chart.draw_series(bars.map(|(s, c, v)| {
                    let y0 = c as f64 + 0.1 + s as f64 * slot;
                    Rectangle::new([(0.0, y0), (v, y0 + slot)], Palette99::pick(s).filled())
                }))?;

                for (s, series) in spec.series.iter().enumerate() {
                    chart
                        .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                        .label(series.name.clone())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 10, y + 5)], Palette99::pick(s).filled())
                        });
                }

                if settings.show_legend {
                    chart
                        .configure_series_labels()
                        .background_style(&WHITE.mix(0.8))
                        .border_style(&BLACK)
                        .draw()?;
                }
            }
        }

        root.present()?;
    }
    Ok(svg)
}
