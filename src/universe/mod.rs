//! Tracked instruments.
//!
//! A universe is built from one or more comma-separated ticker lists. Tokens
//! are trimmed, upper-cased and exchange-qualified, then deduplicated and
//! sorted so the same input always yields the same ordered universe.

pub mod b3;

use crate::models::symbol::Symbol;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolUniverse {
    suffix: String,
    symbols: Vec<Symbol>,
}

impl SymbolUniverse {
    pub fn from_raw_lists(raw_lists: &[&str], suffix: &str) -> Self {
        let symbols: BTreeSet<Symbol> = raw_lists
            .iter()
            .flat_map(|list| list.split(','))
            .filter_map(|token| Symbol::normalize(token, suffix))
            .collect();

        Self {
            suffix: suffix.to_string(),
            symbols: symbols.into_iter().collect(),
        }
    }

    /// The shipped B3 list.
    pub fn b3() -> Self {
        Self::from_raw_lists(&b3::RAW_LISTS, b3::SUFFIX)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Tickers with the exchange suffix stripped, for listing.
    pub fn tickers(&self) -> Vec<&str> {
        self.symbols.iter().map(|s| s.ticker(&self.suffix)).collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
