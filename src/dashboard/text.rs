//! Terminal rendering of a view model

use crate::config::RenderConfig;
use crate::dashboard::layout::{Heading, LayoutRow, Slot, ViewModel, Widget};
use crate::vis::{BubbleTable, Chart, ChartConfig, ChartSpec, ChartStyle, GroupedBarChart};

/// Render the page as plain text, slots stacked top to bottom
pub fn render_text(view: &ViewModel, config: &RenderConfig) -> String {
    let chart_config = ChartConfig {
        width: config.width,
        label_width: (config.width / 4).clamp(8, 24),
        show_values: true,
        style: config.style,
    };
    let rule_char = match config.style {
        ChartStyle::Ascii => '-',
        ChartStyle::Unicode => '─',
    };
    let rule: String = std::iter::repeat(rule_char).take(config.width).collect();

    let mut output = format!("# {}\n\n{}\n", view.title, wrap(&view.description, config.width));

    for row in &view.rows {
        match row {
            LayoutRow::Divider => {
                output.push('\n');
                output.push_str(&rule);
                output.push('\n');
            }
            LayoutRow::Columns { slots } => {
                for slot in slots {
                    output.push('\n');
                    output.push_str(&render_slot(slot, &chart_config));
                }
            }
        }
    }
    output
}

fn render_slot(slot: &Slot, config: &ChartConfig) -> String {
    let mut output = String::new();
    if let Some(Heading { level, text }) = &slot.heading {
        output.push_str(&"#".repeat(*level as usize));
        output.push(' ');
        output.push_str(text);
        output.push('\n');
    }

    match &slot.widget {
        Widget::Chart { chart } => {
            if slot.heading.is_some() {
                output.push('\n');
            }
            let body = match chart {
                ChartSpec::Bar(spec) => GroupedBarChart::with_config(spec, config.clone()).render(),
                ChartSpec::BubbleMap(spec) => BubbleTable::with_config(spec, config.clone()).render(),
            };
            output.push_str(&body);
        }
        Widget::Select { control } => {
            let options: Vec<String> = control
                .options
                .iter()
                .map(|g| {
                    if *g == control.selected {
                        format!("[{}]", g)
                    } else {
                        g.to_string()
                    }
                })
                .collect();
            output.push_str(&format!("{}: {}\n", control.label, options.join(" ")));
        }
        Widget::Text { text } => {
            if !text.is_empty() {
                output.push_str(&wrap(text, config.width));
                output.push('\n');
            }
        }
    }
    output
}

// Greedy word wrap
fn wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::layout::SelectControl;
    use crate::model::Gender;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aa bb cc", 5), "aa bb\ncc");
        assert_eq!(wrap("", 5), "");
    }

    #[test]
    fn test_select_marks_current_option() {
        let view = ViewModel {
            title: "T".to_string(),
            description: "d".to_string(),
            selected_gender: Gender::Male,
            rows: vec![
                LayoutRow::Divider,
                LayoutRow::Columns {
                    slots: vec![Slot {
                        heading: None,
                        widget: Widget::Select {
                            control: SelectControl {
                                label: "Select Gender".to_string(),
                                options: vec![Gender::Female, Gender::Male],
                                selected: Gender::Male,
                            },
                        },
                    }],
                },
            ],
        };
        let config = RenderConfig {
            width: 30,
            style: ChartStyle::Ascii,
        };
        let output = render_text(&view, &config);
        assert!(output.starts_with("# T\n\nd\n"));
        assert!(output.contains(&"-".repeat(30)));
        assert!(output.contains("Select Gender: Female [Male]\n"));
    }
}
