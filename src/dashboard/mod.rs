//! Dashboard rendering and the interaction loop
//!
//! A render pass is a pure function of the selected gender and the loaded
//! data: `render(state, data, config) -> ViewModel`. A [`Session`] owns the
//! state and re-renders after every selection.

pub mod layout;
pub mod text;

use log::{info, warn};

use crate::aggregation;
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::loader::DashboardData;
use crate::model::{columns, Gender, Generation};
use crate::vis::{BarChartSpec, BubbleMapSpec, ChartSpec};

pub use layout::{Heading, LayoutRow, SelectControl, Slot, ViewModel, Widget};
pub use text::render_text;

pub const SELECT_LABEL: &str = "Select Gender";

pub const SELECT_CAPTION: &str =
    "Use the dropdown menu on the side to see comparisons by gender on the chart below";

/// The only piece of UI state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// None until the user picks; the first option is shown meanwhile
    pub selected_gender: Option<Gender>,
}

impl DashboardState {
    pub fn with_gender(gender: Gender) -> Self {
        DashboardState {
            selected_gender: Some(gender),
        }
    }

    /// The gender to render: the selection, or the first option
    pub fn resolve(&self, options: &[Gender]) -> Result<Gender> {
        match self.selected_gender {
            Some(gender) if options.contains(&gender) => Ok(gender),
            Some(gender) => Err(invalid_selection(gender.label(), options)),
            None => options
                .first()
                .copied()
                .ok_or_else(|| Error::Empty("no gender to select".to_string())),
        }
    }
}

/// User interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SelectGender(Gender),
}

fn invalid_selection(value: &str, options: &[Gender]) -> Error {
    Error::InvalidSelection {
        value: value.to_string(),
        options: options
            .iter()
            .map(|g| g.label())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Render the whole page for one state
pub fn render(state: &DashboardState, data: &DashboardData, config: &DashboardConfig) -> Result<ViewModel> {
    let gender = state.resolve(data.genders())?;
    let customers = data.customers();
    let template = config.page.template.as_str();
    let generation_labels = Generation::ALL.map(|g| g.label());

    // Overview: counts per generation and gender
    let overview = aggregation::gender_by_generation(customers)?;
    let gender_columns: Vec<&str> = overview
        .column_names()
        .iter()
        .skip(1)
        .map(|c| c.as_str())
        .collect();
    let overview_chart = BarChartSpec::from_wide(&overview, columns::GENERATION, &gender_columns)?
        .with_template(template);

    // Map: customers per province
    let provinces = aggregation::province_by_generation(customers, data.coordinates())?;
    let map_chart = BubbleMapSpec::from_table(
        &provinces,
        columns::PROVINCE,
        columns::LATITUDE,
        columns::LONGITUDE,
        columns::TOTAL,
        &generation_labels,
    )?
    .with_style(&config.map.style, config.map.zoom);

    // Income and spending for the selected gender
    let income = aggregation::income_spending_by_generation(customers, gender)?;
    let income_chart = BarChartSpec::from_wide(
        &income,
        columns::GENERATION,
        &[columns::ANNUAL_INCOME, columns::SPENDING_SCORE],
    )?
    .with_labels(
        "Generation",
        "Average Income (million) & Spending Score",
        "Metric",
    )
    .with_template(template);

    // Professions for the selected gender
    let professions = aggregation::profession_by_generation(customers, gender)?;
    let profession_chart = BarChartSpec::from_long(
        &professions,
        columns::PROFESSION,
        columns::GENERATION,
        columns::NUM_PEOPLE,
        &generation_labels,
    )?
    .with_labels("Profession", "Profession Count", "Generation")
    .with_template(template);

    let rows = vec![
        LayoutRow::Columns {
            slots: vec![
                chart_slot("Comparison of Gender by Generation", ChartSpec::Bar(overview_chart)),
                chart_slot(
                    "Customer's Generation Across Indonesia",
                    ChartSpec::BubbleMap(map_chart),
                ),
            ],
        },
        LayoutRow::Divider,
        LayoutRow::Columns {
            slots: vec![
                Slot {
                    heading: None,
                    widget: Widget::Select {
                        control: SelectControl {
                            label: SELECT_LABEL.to_string(),
                            options: data.genders().to_vec(),
                            selected: gender,
                        },
                    },
                },
                Slot {
                    heading: Some(Heading::new(5, SELECT_CAPTION)),
                    widget: Widget::Text {
                        text: String::new(),
                    },
                },
            ],
        },
        LayoutRow::Divider,
        LayoutRow::Columns {
            slots: vec![
                chart_slot(
                    format!(
                        "Comparison of {} Customer Average Annual Income and Spending Score by Generation (In Million)",
                        gender
                    ),
                    ChartSpec::Bar(income_chart),
                ),
                chart_slot(
                    format!("{} Customer Profession Comparison by Generation", gender),
                    ChartSpec::Bar(profession_chart),
                ),
            ],
        },
    ];

    Ok(ViewModel {
        title: config.page.title.clone(),
        description: config.page.description.clone(),
        selected_gender: gender,
        rows,
    })
}

fn chart_slot(heading: impl Into<String>, chart: ChartSpec) -> Slot {
    Slot {
        heading: Some(Heading::new(3, heading)),
        widget: Widget::Chart { chart },
    }
}

/// One viewer's dashboard: the loaded data plus the current selection
#[derive(Debug, Clone)]
pub struct Session {
    data: DashboardData,
    config: DashboardConfig,
    state: DashboardState,
}

impl Session {
    pub fn new(data: DashboardData, config: DashboardConfig) -> Self {
        Session {
            data,
            config,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Selector options: sorted distinct genders in the data
    pub fn options(&self) -> &[Gender] {
        self.data.genders()
    }

    /// Render the current state
    pub fn view(&self) -> Result<ViewModel> {
        render(&self.state, &self.data, &self.config)
    }

    /// Apply an event and re-render. A rejected event leaves the state unchanged.
    pub fn handle(&mut self, event: Event) -> Result<ViewModel> {
        match event {
            Event::SelectGender(gender) => {
                if !self.options().contains(&gender) {
                    return Err(invalid_selection(gender.label(), self.options()));
                }
                info!("gender selection changed to {}", gender);
                self.state.selected_gender = Some(gender);
            }
        }
        self.view()
    }

    /// Parse a label typed by the user and select it
    pub fn select(&mut self, label: &str) -> Result<ViewModel> {
        let gender = Gender::parse(label).ok_or_else(|| invalid_selection(label, self.options()))?;
        self.handle(Event::SelectGender(gender))
    }

    /// Select each label in turn and pass every successful render to `on_view`
    ///
    /// Blank labels are skipped. A rejected label is logged and keeps the
    /// current state; any other error stops the loop. Returns the number of
    /// renders handed to `on_view`.
    pub fn apply_selections<I, S, F>(&mut self, labels: I, mut on_view: F) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&ViewModel) -> Result<()>,
    {
        let mut rendered = 0;
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            match self.select(label) {
                Ok(view) => {
                    on_view(&view)?;
                    rendered += 1;
                }
                Err(e @ Error::InvalidSelection { .. }) => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(rendered)
    }
}
