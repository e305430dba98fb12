//! End-to-end computation passes against an in-memory price source.

use async_trait::async_trait;
use chrono::{Duration as Days, NaiveDate};
use market_breadth::{
    BreadthError, BreadthService, CloseField, Config, FetchRange, MarketData, MarketDataProvider,
    PriceFetcher, PricePanel, ReferenceSeries, Result, Symbol, SymbolUniverse,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Behaviour {
    Prices { rows: usize },
    WithoutReference { rows: usize },
    Empty,
    Fail,
}

struct StubFetcher {
    behaviour: Behaviour,
    calls: AtomicUsize,
    last_range: Mutex<Option<FetchRange>>,
}

impl StubFetcher {
    fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last_range: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn price(symbol_index: usize, row: usize) -> f64 {
    let phase = symbol_index as f64;
    100.0 + 5.0 * phase + 10.0 * (row as f64 * 0.1 + phase).sin()
}

#[async_trait]
impl PriceFetcher for StubFetcher {
    fn provider_name(&self) -> &'static str {
        "stub"
    }

    async fn fetch(&self, symbols: &[Symbol], range: &FetchRange) -> Result<MarketData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().unwrap() = Some(*range);

        let rows = match self.behaviour {
            Behaviour::Prices { rows } | Behaviour::WithoutReference { rows } => rows,
            Behaviour::Empty => 0,
            Behaviour::Fail => {
                return Err(BreadthError::DataError("HTTP status 503".to_string()));
            }
        };

        let dates: Vec<NaiveDate> = range.start.iter_days().take(rows).collect();
        let series = symbols
            .iter()
            .enumerate()
            .map(|(s, symbol)| {
                let points = dates
                    .iter()
                    .enumerate()
                    .map(|(row, date)| (*date, price(s, row)))
                    .collect::<BTreeMap<_, _>>();
                (symbol.clone(), points)
            })
            .collect();
        let reference = dates
            .iter()
            .enumerate()
            .filter(|(row, _)| row % 2 == 0)
            .filter(|_| !matches!(self.behaviour, Behaviour::WithoutReference { .. }))
            .map(|(row, date)| (*date, 120_000.0 + row as f64))
            .collect();

        Ok(MarketData {
            panel: PricePanel::from_series(series),
            reference: ReferenceSeries::new(Symbol::raw("^BVSP"), reference),
            panel_field: CloseField::Adjusted,
            reference_field: CloseField::Raw,
        })
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn service_with(fetcher: Arc<StubFetcher>, raw: &str) -> BreadthService {
    let universe = SymbolUniverse::from_raw_lists(&[raw], ".SA");
    let provider = MarketDataProvider::new(fetcher, Duration::from_secs(3600));
    BreadthService::new(Config::new(), universe, provider).unwrap()
}

fn service(fetcher: Arc<StubFetcher>) -> BreadthService {
    service_with(fetcher, "PETR4, VALE3, ITUB4")
}

#[tokio::test]
async fn test_report_for_requested_window() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 400 });
    let report = service(fetcher.clone()).compute(30, today()).await.unwrap();

    assert_eq!(report.universe_size, 3);
    assert_eq!(report.symbols_with_data, 3);
    assert_eq!(report.display.len(), 30);
    assert_eq!(report.rows.len(), 30);
    assert_eq!(report.windows(), vec![5, 10, 20, 50, 200]);
    assert_eq!(report.metrics.len(), 5);
    assert!(report.metrics.iter().all(|m| m.delta.is_some()));
    assert_eq!(report.panel_field, CloseField::Adjusted);
    assert_eq!(report.reference_field, CloseField::Raw);

    let last = report.range.start + Days::days(399);
    assert_eq!(report.display.last_date(), Some(last));

    for row in &report.rows {
        for value in &row.values {
            assert!((0.0..=100.0).contains(value));
            assert_eq!(*value, (value * 10.0).round() / 10.0);
        }
    }
    // Reference only quotes every other date
    assert!(report.display.reference.iter().any(Option::is_none));
    assert!(report.display.reference.iter().any(Option::is_some));
}

#[tokio::test]
async fn test_fetch_range_includes_warm_up() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 400 });
    service(fetcher.clone()).compute(90, today()).await.unwrap();

    let range = fetcher.last_range.lock().unwrap().unwrap();
    assert_eq!(range.start, today() - Days::days(90 + 365));
    assert_eq!(range.end, today() + Days::days(1));
}

#[tokio::test]
async fn test_short_history_returns_everything_available() {
    // 250 rows: the 200-day average first exists on row 199
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 250 });
    let report = service(fetcher).compute(365, today()).await.unwrap();

    assert_eq!(report.display.len(), 51);
}

#[tokio::test]
async fn test_insufficient_history() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 150 });
    let result = service(fetcher).compute(30, today()).await;

    assert!(matches!(
        result,
        Err(BreadthError::InsufficientHistory { fetched_days: 150 })
    ));
}

#[tokio::test]
async fn test_report_without_reference_quotes() {
    let fetcher = StubFetcher::new(Behaviour::WithoutReference { rows: 300 });
    let report = service(fetcher).compute(30, today()).await.unwrap();

    assert_eq!(report.display.len(), 30);
    assert!(report.display.reference.iter().all(Option::is_none));
    assert!(report.rows.iter().all(|row| row.reference.is_none()));
}

#[tokio::test]
async fn test_empty_fetch_is_fetch_failure() {
    let fetcher = StubFetcher::new(Behaviour::Empty);
    let result = service(fetcher).compute(30, today()).await;

    assert!(matches!(result, Err(BreadthError::FetchFailure(_))));
}

#[tokio::test]
async fn test_provider_error_is_fetch_failure() {
    let fetcher = StubFetcher::new(Behaviour::Fail);
    let result = service(fetcher).compute(30, today()).await;

    match result {
        Err(BreadthError::FetchFailure(message)) => assert!(message.contains("503")),
        other => panic!("expected FetchFailure, got {:?}", other.map(|r| r.display.len())),
    }
}

#[tokio::test]
async fn test_empty_universe_checked_before_fetch() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 400 });
    let result = service_with(fetcher.clone(), " , ").compute(30, today()).await;

    assert!(matches!(result, Err(BreadthError::EmptyUniverse)));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_display_days_out_of_range() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 400 });
    let result = service(fetcher.clone()).compute(10, today()).await;

    assert!(matches!(result, Err(BreadthError::ConfigError(_))));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_cached_and_fresh_passes_agree() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 400 });
    let service = service(fetcher.clone());

    let fresh = service.compute(60, today()).await.unwrap();
    let cached = service.compute(60, today()).await.unwrap();
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(fresh.display, cached.display);

    service.refresh();
    let refetched = service.compute(60, today()).await.unwrap();
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(fresh.display, refetched.display);
    assert_eq!(fresh.rows, refetched.rows);
}

#[tokio::test]
async fn test_report_serializes() {
    let fetcher = StubFetcher::new(Behaviour::Prices { rows: 300 });
    let report = service(fetcher).compute(30, today()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["metrics"].as_array().unwrap().len(), 5);
    assert_eq!(json["rows"].as_array().unwrap().len(), 30);
    assert_eq!(json["panel_field"], "Adjusted");
}
