//! View model: the whole page produced by one render pass

use serde::Serialize;

use crate::error::Result;
use crate::model::Gender;
use crate::vis::ChartSpec;

/// Markdown-style heading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Heading {
            level,
            text: text.into(),
        }
    }
}

/// Dropdown control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectControl {
    pub label: String,
    pub options: Vec<Gender>,
    pub selected: Gender,
}

/// Content of one layout slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Chart { chart: ChartSpec },
    Select { control: SelectControl },
    Text { text: String },
}

/// One cell of a multi-column row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub heading: Option<Heading>,
    #[serde(flatten)]
    pub widget: Widget,
}

/// A page row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum LayoutRow {
    /// Equal-width columns, left to right
    Columns { slots: Vec<Slot> },
    Divider,
}

/// Everything the client needs to draw the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub description: String,
    pub selected_gender: Gender,
    pub rows: Vec<LayoutRow>,
}

impl ViewModel {
    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All slots in page order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                LayoutRow::Columns { slots } => Some(slots.iter()),
                LayoutRow::Divider => None,
            })
            .flatten()
    }

    /// All charts in page order
    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.slots()
            .filter_map(|slot| match &slot.widget {
                Widget::Chart { chart } => Some(chart),
                _ => None,
            })
            .collect()
    }
}
