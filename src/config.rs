use crate::errors::{BreadthError, Result};
use chrono_tz::Tz;
use std::time::Duration;

pub const MIN_DISPLAY_DAYS: usize = 30;
pub const MAX_DISPLAY_DAYS: usize = 1825;
pub const DEFAULT_WINDOWS: [usize; 5] = [5, 10, 20, 50, 200];

pub struct Config {
    pub display_days: usize,
    pub show_grid: bool,
    pub windows: Vec<usize>,
    pub warmup_days: i64,
    pub end_buffer_days: i64,
    pub cache_ttl: Duration,
    pub exchange_suffix: String,
    pub reference_symbol: String,
    pub timezone: Tz,
    pub request_interval: Duration,
}

impl Config {
    pub fn new() -> Self {
        Self {
            display_days: 365,
            show_grid: true,
            windows: DEFAULT_WINDOWS.to_vec(),
            warmup_days: 365,
            end_buffer_days: 1,
            cache_ttl: Duration::from_secs(3600),
            exchange_suffix: ".SA".to_string(),
            reference_symbol: "^BVSP".to_string(),
            timezone: chrono_tz::America::Sao_Paulo,
            request_interval: Duration::from_millis(200),
        }
    }

    pub fn with_display_days(mut self, days: usize) -> Self {
        self.display_days = days;
        self
    }

    pub fn with_show_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_windows(mut self, windows: &[usize]) -> Self {
        self.windows = windows.to_vec();
        self
    }

    pub fn with_warmup_days(mut self, days: i64) -> Self {
        self.warmup_days = days;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_reference_symbol(mut self, symbol: &str) -> Self {
        self.reference_symbol = symbol.to_string();
        self
    }

    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.request_interval = interval;
        self
    }

    /// Check a display lookback against the allowed range.
    pub fn validate_display_days(days: usize) -> Result<usize> {
        if (MIN_DISPLAY_DAYS..=MAX_DISPLAY_DAYS).contains(&days) {
            Ok(days)
        } else {
            Err(BreadthError::ConfigError(format!(
                "display lookback must be between {} and {} trading days, got {}",
                MIN_DISPLAY_DAYS, MAX_DISPLAY_DAYS, days
            )))
        }
    }

    pub fn validate(&self) -> Result<()> {
        Self::validate_display_days(self.display_days)?;
        if self.windows.is_empty() || self.windows.iter().any(|&w| w == 0) {
            return Err(BreadthError::ConfigError(format!(
                "moving-average windows must be non-empty and positive, got {:?}",
                self.windows
            )));
        }
        if self.warmup_days < 0 || self.end_buffer_days < 0 {
            return Err(BreadthError::ConfigError(
                "warm-up and end buffer must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
