pub mod base;
pub mod yahoo;

pub use base::PriceFetcher;
pub use yahoo::YahooFetcher;
