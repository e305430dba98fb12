use crate::breadth::{BreadthCalculator, WindowSelector};
use crate::config::Config;
use crate::data_provider::MarketDataProvider;
use crate::errors::{BreadthError, Result};
use crate::models::panel::FetchRange;
use crate::models::report::{table_rows, window_metrics, BreadthReport};
use crate::universe::SymbolUniverse;
use crate::util;
use chrono::NaiveDate;
use log::{info, warn};

/// Runs one breadth computation pass from universe to report.
pub struct BreadthService {
    config: Config,
    universe: SymbolUniverse,
    provider: MarketDataProvider,
    calculator: BreadthCalculator,
}

impl BreadthService {
    pub fn new(config: Config, universe: SymbolUniverse, provider: MarketDataProvider) -> Result<Self> {
        config.validate()?;
        let calculator = BreadthCalculator::new(&config.windows)?;

        Ok(Self {
            config,
            universe,
            provider,
            calculator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn universe(&self) -> &SymbolUniverse {
        &self.universe
    }

    /// Calendar range fetched for a given display length.
    pub fn fetch_range(&self, display_days: usize, today: NaiveDate) -> FetchRange {
        FetchRange::for_display(
            today,
            display_days,
            self.config.warmup_days,
            self.config.end_buffer_days,
        )
    }

    /// Compute the report as of the current exchange date.
    pub async fn compute_now(&self, display_days: usize) -> Result<BreadthReport> {
        let today = util::today_in(&self.config.timezone);
        self.compute(display_days, today).await
    }

    pub async fn compute(&self, display_days: usize, today: NaiveDate) -> Result<BreadthReport> {
        let display_days = Config::validate_display_days(display_days)?;

        if self.universe.is_empty() {
            return Err(BreadthError::EmptyUniverse);
        }

        let range = self.fetch_range(display_days, today);
        info!(
            "Computing breadth for {} symbols, {} display days ({} to {})",
            self.universe.len(),
            display_days,
            range.start,
            range.end
        );

        let data = self
            .provider
            .load(self.universe.symbols(), &range)
            .await
            .map_err(BreadthError::into_fetch_failure)?;
        if data.panel.is_empty() {
            return Err(BreadthError::FetchFailure(
                "price panel is empty".to_string(),
            ));
        }
        if data.panel.num_symbols() < self.universe.len() {
            warn!(
                "{} of {} symbols have no data in range",
                self.universe.len() - data.panel.num_symbols(),
                self.universe.len()
            );
        }

        let table = self.calculator.compute(&data.panel);
        let display = WindowSelector::new(display_days).select(&table, &data.reference)?;

        info!(
            "Display window has {} trading days ({:?} to {:?})",
            display.len(),
            display.first_date(),
            display.last_date()
        );

        Ok(BreadthReport {
            universe_size: self.universe.len(),
            symbols_with_data: data.panel.num_symbols(),
            range,
            panel_field: data.panel_field,
            reference_field: data.reference_field,
            metrics: window_metrics(&display),
            rows: table_rows(&display),
            display,
        })
    }

    /// Drop cached market data so the next pass refetches.
    pub fn refresh(&self) {
        self.provider.invalidate();
    }
}
