use crate::errors::{BreadthError, Result};
use crate::models::symbol::Symbol;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Which provider close column feeds the prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloseField {
    Adjusted,
    Raw,
}

/// Calendar range requested from the provider. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FetchRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchRange {
    /// `display_days + warmup_days` calendar days back from `today`,
    /// `end_buffer_days` forward so today's session is included.
    pub fn for_display(today: NaiveDate, display_days: usize, warmup_days: i64, end_buffer_days: i64) -> Self {
        Self {
            start: today - Duration::days(display_days as i64 + warmup_days),
            end: today + Duration::days(end_buffer_days),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Closing prices of one symbol, aligned to the panel's dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceColumn {
    pub symbol: Symbol,
    pub prices: Vec<Option<f64>>,
}

/// Date x symbol table of closing prices, ascending by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricePanel {
    dates: Vec<NaiveDate>,
    columns: Vec<PriceColumn>,
}

impl PricePanel {
    /// Build a panel from pre-aligned columns. Dates must be strictly
    /// ascending and every column as long as the date index. Columns with
    /// no observation at all are dropped.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<PriceColumn>) -> Result<Self> {
        if dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(BreadthError::DataError(
                "panel dates must be strictly ascending".to_string(),
            ));
        }
        if let Some(bad) = columns.iter().find(|c| c.prices.len() != dates.len()) {
            return Err(BreadthError::DataError(format!(
                "column {} has {} rows, expected {}",
                bad.symbol,
                bad.prices.len(),
                dates.len()
            )));
        }

        let mut panel = Self { dates, columns };
        panel.drop_empty_columns();
        Ok(panel)
    }

    /// Align per-symbol observations onto the union of their dates.
    pub fn from_series(series: Vec<(Symbol, BTreeMap<NaiveDate, f64>)>) -> Self {
        let dates: Vec<NaiveDate> = series
            .iter()
            .flat_map(|(_, points)| points.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let columns = series
            .into_iter()
            .map(|(symbol, points)| PriceColumn {
                symbol,
                prices: dates.iter().map(|d| points.get(d).copied()).collect(),
            })
            .collect();

        let mut panel = Self { dates, columns };
        panel.drop_empty_columns();
        panel
    }

    fn drop_empty_columns(&mut self) {
        self.columns.retain(|c| c.prices.iter().any(Option::is_some));
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[PriceColumn] {
        &self.columns
    }

    pub fn column(&self, symbol: &Symbol) -> Option<&PriceColumn> {
        self.columns.iter().find(|c| &c.symbol == symbol)
    }

    pub fn num_dates(&self) -> usize {
        self.dates.len()
    }

    pub fn num_symbols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }
}

/// Index levels used only as a chart overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceSeries {
    pub symbol: Option<Symbol>,
    pub points: BTreeMap<NaiveDate, f64>,
}

impl ReferenceSeries {
    pub fn new(symbol: Symbol, points: BTreeMap<NaiveDate, f64>) -> Self {
        Self {
            symbol: Some(symbol),
            points,
        }
    }

    pub fn value_at(&self, date: &NaiveDate) -> Option<f64> {
        self.points.get(date).copied()
    }

    /// Values on exactly `dates`; dates the index did not trade yield `None`.
    pub fn align(&self, dates: &[NaiveDate]) -> Vec<Option<f64>> {
        dates.iter().map(|d| self.value_at(d)).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything one fetch returns.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub panel: PricePanel,
    pub reference: ReferenceSeries,
    pub panel_field: CloseField,
    pub reference_field: CloseField,
}
