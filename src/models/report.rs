use crate::models::breadth::DisplayWindow;
use crate::models::panel::{CloseField, FetchRange};
use crate::util::round1;
use chrono::NaiveDate;
use serde::Serialize;

/// Latest reading of one window and its change from the previous session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowMetric {
    pub window: usize,
    pub latest: f64,
    /// `None` when only one point is displayed.
    pub delta: Option<f64>,
}

/// One row of the tabular view, values rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: NaiveDate,
    pub values: Vec<f64>,
    pub reference: Option<f64>,
}

/// Display grouping of the windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn title(&self) -> &'static str {
        match self {
            Horizon::Short => "Short term",
            Horizon::Medium => "Medium term",
            Horizon::Long => "Long term",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Horizon::Short => "Very short-term view. Flags quick overbought/oversold swings.",
            Horizon::Medium => "Tactical view. Follows the monthly trend.",
            Horizon::Long => "Structural view. Defines the health of the primary trend.",
        }
    }

    pub fn of_window(window: usize) -> Self {
        match window {
            0..=10 => Horizon::Short,
            11..=30 => Horizon::Medium,
            _ => Horizon::Long,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BreadthReport {
    pub universe_size: usize,
    pub symbols_with_data: usize,
    pub range: FetchRange,
    pub panel_field: CloseField,
    pub reference_field: CloseField,
    pub display: DisplayWindow,
    pub metrics: Vec<WindowMetric>,
    pub rows: Vec<TableRow>,
}

impl BreadthReport {
    pub fn windows(&self) -> Vec<usize> {
        self.display.table.windows()
    }
}

/// Latest value and delta per window. Empty for an empty window.
pub fn window_metrics(display: &DisplayWindow) -> Vec<WindowMetric> {
    display
        .table
        .columns
        .iter()
        .filter_map(|column| {
            let values = column.percentages();
            let latest = (*values.last()?)?;
            let delta = match values.len() {
                0 | 1 => None,
                n => values[n - 2].map(|previous| latest - previous),
            };
            Some(WindowMetric {
                window: column.window,
                latest,
                delta,
            })
        })
        .collect()
}

pub fn table_rows(display: &DisplayWindow) -> Vec<TableRow> {
    display
        .table
        .dates
        .iter()
        .enumerate()
        .map(|(row, date)| TableRow {
            date: *date,
            values: display
                .table
                .columns
                .iter()
                .map(|c| c.percent(row).map(round1).unwrap_or(f64::NAN))
                .collect(),
            reference: display.reference.get(row).copied().flatten(),
        })
        .collect()
}
