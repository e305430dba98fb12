// Public modules
pub mod models;
pub mod breadth;
pub mod universe;
pub mod data_provider;
pub mod fetchers;
pub mod services;
pub mod errors;
pub mod config;
pub mod render;

#[doc(hidden)]
pub mod util;

// Re-export the types most callers need
pub use breadth::{BreadthCalculator, WindowSelector};
pub use config::Config;
pub use data_provider::MarketDataProvider;
pub use errors::{BreadthError, Result};
pub use fetchers::{PriceFetcher, YahooFetcher};
pub use models::breadth::{BreadthCount, BreadthTable, DisplayWindow};
pub use models::panel::{CloseField, FetchRange, MarketData, PriceColumn, PricePanel, ReferenceSeries};
pub use models::report::BreadthReport;
pub use models::symbol::Symbol;
pub use services::BreadthService;
pub use universe::SymbolUniverse;
