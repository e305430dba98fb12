use chrono::NaiveDate;
use serde::Serialize;

/// Participation on one date for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BreadthCount {
    /// Symbols with both price and moving average defined and price above it.
    pub above: usize,
    /// Symbols whose moving average is defined.
    pub valid: usize,
}

impl BreadthCount {
    /// Percentage above, undefined when no symbol has a valid average.
    pub fn percent(&self) -> Option<f64> {
        if self.valid == 0 {
            None
        } else {
            Some(100.0 * self.above as f64 / self.valid as f64)
        }
    }
}

/// One moving-average window's breadth, aligned to the table dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadthColumn {
    pub window: usize,
    pub counts: Vec<BreadthCount>,
}

impl BreadthColumn {
    pub fn percent(&self, row: usize) -> Option<f64> {
        self.counts.get(row).and_then(BreadthCount::percent)
    }

    pub fn percentages(&self) -> Vec<Option<f64>> {
        self.counts.iter().map(BreadthCount::percent).collect()
    }

    /// First row with a defined percentage.
    pub fn first_defined(&self) -> Option<usize> {
        self.counts.iter().position(|c| c.valid > 0)
    }
}

/// Breadth for every window, one column per window.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BreadthTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<BreadthColumn>,
}

impl BreadthTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn windows(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.window).collect()
    }

    pub fn column(&self, window: usize) -> Option<&BreadthColumn> {
        self.columns.iter().find(|c| c.window == window)
    }

    /// A row is usable once every window has a defined percentage.
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.columns.iter().all(|c| c.percent(row).is_some())
    }

    /// Copy of the table restricted to `rows` (ascending indices).
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            dates: rows.iter().map(|&r| self.dates[r]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| BreadthColumn {
                    window: c.window,
                    counts: rows.iter().map(|&r| c.counts[r]).collect(),
                })
                .collect(),
        }
    }
}

/// Trimmed breadth table plus the reference index on the same dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWindow {
    pub table: BreadthTable,
    pub reference: Vec<Option<f64>>,
}

impl DisplayWindow {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.table.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.table.dates.last().copied()
    }

    /// Percentage series of one window; every entry is defined after trimming.
    pub fn series(&self, window: usize) -> Vec<(NaiveDate, f64)> {
        match self.table.column(window) {
            Some(column) => self
                .table
                .dates
                .iter()
                .zip(column.percentages())
                .filter_map(|(date, pct)| pct.map(|p| (*date, p)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Defined reference points, for the overlay.
    pub fn reference_series(&self) -> Vec<(NaiveDate, f64)> {
        self.table
            .dates
            .iter()
            .zip(&self.reference)
            .filter_map(|(date, level)| level.map(|l| (*date, l)))
            .collect()
    }
}
