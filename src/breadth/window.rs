use crate::errors::{BreadthError, Result};
use crate::models::breadth::{BreadthTable, DisplayWindow};
use crate::models::panel::ReferenceSeries;
use log::debug;

/// Cuts the warm-up rows and keeps the requested number of trading days.
#[derive(Debug, Clone, Copy)]
pub struct WindowSelector {
    display_days: usize,
}

impl WindowSelector {
    pub fn new(display_days: usize) -> Self {
        Self { display_days }
    }

    pub fn display_days(&self) -> usize {
        self.display_days
    }

    /// Drop every date where any window is undefined, then keep the last
    /// `display_days` dates. Fails when nothing survives.
    pub fn trim(&self, table: &BreadthTable) -> Result<BreadthTable> {
        let complete: Vec<usize> = (0..table.len())
            .filter(|&row| table.is_row_complete(row))
            .collect();

        if complete.is_empty() {
            return Err(BreadthError::InsufficientHistory {
                fetched_days: table.len(),
            });
        }

        let keep = &complete[complete.len().saturating_sub(self.display_days)..];
        debug!(
            "Trimmed breadth table from {} to {} dates ({} complete)",
            table.len(),
            keep.len(),
            complete.len()
        );

        Ok(table.select_rows(keep))
    }

    /// Trim and put the reference index on the surviving dates.
    pub fn select(&self, table: &BreadthTable, reference: &ReferenceSeries) -> Result<DisplayWindow> {
        let table = self.trim(table)?;
        let reference = reference.align(&table.dates);
        Ok(DisplayWindow { table, reference })
    }
}
