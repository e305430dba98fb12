//! Percentage of stocks trading above their moving averages.
//!
//! For each window `w` the calculator compares every symbol's price with its
//! own trailing `w`-row average and counts, per date, how many symbols have a
//! defined average (`valid`) and how many of those trade above it (`above`).
//! Undefined averages are excluded from both counts rather than read as
//! "below", and a date where no symbol has a defined average stays undefined.

pub mod rolling;
pub mod window;

pub use window::WindowSelector;

use crate::errors::{BreadthError, Result};
use crate::models::breadth::{BreadthColumn, BreadthCount, BreadthTable};
use crate::models::panel::{PriceColumn, PricePanel};
use log::debug;
use rolling::trailing_sma;

#[derive(Debug, Clone)]
pub struct BreadthCalculator {
    windows: Vec<usize>,
}

impl BreadthCalculator {
    pub fn new(windows: &[usize]) -> Result<Self> {
        if windows.is_empty() {
            return Err(BreadthError::ConfigError(
                "at least one moving-average window is required".to_string(),
            ));
        }
        if windows.contains(&0) {
            return Err(BreadthError::ConfigError(
                "moving-average windows must be positive".to_string(),
            ));
        }

        Ok(Self {
            windows: windows.to_vec(),
        })
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// One breadth column per window over every date of `panel`.
    pub fn compute(&self, panel: &PricePanel) -> BreadthTable {
        let columns = self
            .windows
            .iter()
            .map(|&window| BreadthColumn {
                window,
                counts: Self::count_window(panel, window),
            })
            .collect();

        debug!(
            "Computed breadth for {} windows over {} dates and {} symbols",
            self.windows.len(),
            panel.num_dates(),
            panel.num_symbols()
        );

        BreadthTable {
            dates: panel.dates().to_vec(),
            columns,
        }
    }

    fn count_window(panel: &PricePanel, window: usize) -> Vec<BreadthCount> {
        let mut counts = vec![BreadthCount::default(); panel.num_dates()];

        for column in panel.columns() {
            Self::accumulate(&mut counts, column, window);
        }

        counts
    }

    fn accumulate(counts: &mut [BreadthCount], column: &PriceColumn, window: usize) {
        let averages = trailing_sma(&column.prices, window);

        for ((count, price), average) in counts.iter_mut().zip(&column.prices).zip(averages) {
            let Some(average) = average else { continue };
            count.valid += 1;
            if matches!(price, Some(p) if *p > average) {
                count.above += 1;
            }
        }
    }
}
