use crate::errors::Result;
use crate::models::panel::{FetchRange, MarketData};
use crate::models::symbol::Symbol;
use async_trait::async_trait;

/// Source of closing prices for the tracked symbols and the reference index
#[async_trait]
pub trait PriceFetcher {
    /// Name of the data provider, for logs
    fn provider_name(&self) -> &'static str;

    /// Fetch an aligned price panel for `symbols` and the reference series
    /// over `range`. Symbols without any data are left out of the panel;
    /// any other failure fails the whole fetch.
    async fn fetch(&self, symbols: &[Symbol], range: &FetchRange) -> Result<MarketData>;
}
