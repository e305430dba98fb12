use crate::config::Config;
use crate::errors::{BreadthError, Result};
use crate::fetchers::base::PriceFetcher;
use crate::models::panel::{CloseField, FetchRange, MarketData, PricePanel, ReferenceSeries};
use crate::models::symbol::Symbol;
use crate::util;
use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Daily closes of one symbol as returned by the chart endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub timestamps: Vec<i64>,
    pub close: Vec<Option<f64>>,
    pub adjclose: Option<Vec<Option<f64>>>,
}

impl ChartSeries {
    pub fn has_adjusted(&self) -> bool {
        self.adjclose
            .as_ref()
            .is_some_and(|adj| adj.len() == self.timestamps.len())
    }

    /// Trading date -> close for the chosen field, restricted to `range`.
    /// Missing and non-finite closes are skipped.
    pub fn points(&self, field: CloseField, tz: &Tz, range: &FetchRange) -> Result<BTreeMap<NaiveDate, f64>> {
        let values = match (field, &self.adjclose) {
            (CloseField::Adjusted, Some(adj)) => adj,
            _ => &self.close,
        };

        let mut points = BTreeMap::new();
        for (timestamp, value) in self.timestamps.iter().zip(values) {
            let Some(price) = (*value).filter(|p| p.is_finite()) else { continue };
            let date = util::timestamp_to_date(*timestamp, tz)?;
            if range.contains(date) {
                points.insert(date, price);
            }
        }
        Ok(points)
    }
}

/// Adjusted closes only when every chart carries them, raw closes otherwise.
pub fn select_close_field<'a, I>(preferred: CloseField, charts: I) -> CloseField
where
    I: IntoIterator<Item = &'a ChartSeries>,
{
    match preferred {
        CloseField::Raw => CloseField::Raw,
        CloseField::Adjusted => {
            if charts.into_iter().all(ChartSeries::has_adjusted) {
                CloseField::Adjusted
            } else {
                CloseField::Raw
            }
        }
    }
}

/// Parse a chart body. `Ok(None)` means the provider has no data for the
/// symbol in the range.
pub fn parse_chart(body: &str) -> Result<Option<ChartSeries>> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Ok(None);
        }
        return Err(BreadthError::ProviderError {
            code: error.code,
            description: error.description,
        });
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };
    let Some(timestamps) = data.timestamp.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let close = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .ok_or_else(|| BreadthError::DataError("chart has no quote block".to_string()))?;
    if close.len() != timestamps.len() {
        return Err(BreadthError::DataError(format!(
            "chart has {} timestamps but {} closes",
            timestamps.len(),
            close.len()
        )));
    }

    let adjclose = data
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose);

    Ok(Some(ChartSeries {
        timestamps,
        close,
        adjclose,
    }))
}

/// Yahoo Finance chart API client
pub struct YahooFetcher {
    client: Client,
    base_url: String,
    reference: Symbol,
    preferred_field: CloseField,
    timezone: Tz,
    request_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl YahooFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(BreadthError::RequestError)?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            reference: Symbol::raw(&config.reference_symbol),
            preferred_field: CloseField::Adjusted,
            timezone: config.timezone,
            request_interval: config.request_interval,
            last_request: Mutex::new(None),
        })
    }

    /// Point the fetcher at another chart endpoint (a mirror or proxy).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client, e.g. with custom proxy settings.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_preferred_field(mut self, field: CloseField) -> Self {
        self.preferred_field = field;
        self
    }

    fn chart_url(&self, symbol: &Symbol) -> String {
        format!("{}/{}", self.base_url, symbol.as_str().replace('^', "%5E"))
    }

    async fn wait_for_rate_limit(&self) {
        let now = Instant::now();
        let should_wait = {
            let mut last = self.last_request.lock().unwrap_or_else(PoisonError::into_inner);
            let should_wait = (*last)
                .map(|instant| instant.elapsed())
                .filter(|elapsed| *elapsed < self.request_interval)
                .map(|elapsed| self.request_interval - elapsed);
            *last = Some(now);
            should_wait
        };

        if let Some(wait_time) = should_wait {
            tokio::time::sleep(wait_time).await;
        }
    }

    async fn fetch_chart(&self, symbol: &Symbol, range: &FetchRange) -> Result<Option<ChartSeries>> {
        self.wait_for_rate_limit().await;
        debug!("Requesting chart for {} ({} to {})", symbol, range.start, range.end);

        let period1 = util::date_to_timestamp(range.start).to_string();
        let period2 = util::date_to_timestamp(range.end).to_string();
        let response = self
            .client
            .get(self.chart_url(symbol))
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", "1d"),
                ("events", "div,split"),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(BreadthError::DataError(format!(
                "chart request for {} failed: HTTP status {}",
                symbol, status
            )));
        }

        parse_chart(&body)
    }
}

#[async_trait]
impl PriceFetcher for YahooFetcher {
    fn provider_name(&self) -> &'static str {
        "Yahoo Finance"
    }

    async fn fetch(&self, symbols: &[Symbol], range: &FetchRange) -> Result<MarketData> {
        info!(
            "Downloading {} symbols from {} ({} to {})",
            symbols.len(),
            self.provider_name(),
            range.start,
            range.end
        );

        let mut charts = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.fetch_chart(symbol, range).await? {
                Some(chart) => charts.push((symbol.clone(), chart)),
                None => warn!("No data for {}, leaving it out", symbol),
            }
        }

        // Overlay only: an unknown index leaves the breadth panel usable.
        let reference_chart = self.fetch_chart(&self.reference, range).await?;
        if reference_chart.is_none() {
            warn!("No data for reference index {}, showing breadth without it", self.reference);
        }

        let panel_field = select_close_field(self.preferred_field, charts.iter().map(|(_, c)| c));
        let reference_field = select_close_field(self.preferred_field, reference_chart.iter());
        if panel_field != self.preferred_field {
            warn!("Adjusted closes unavailable for some symbols, using raw closes for the panel");
        }

        let series = charts
            .iter()
            .map(|(symbol, chart)| Ok((symbol.clone(), chart.points(panel_field, &self.timezone, range)?)))
            .collect::<Result<Vec<_>>>()?;
        let panel = PricePanel::from_series(series);
        if panel.is_empty() {
            return Err(BreadthError::FetchFailure(format!(
                "{} returned no prices for {} symbols",
                self.provider_name(),
                symbols.len()
            )));
        }

        let reference_points = match &reference_chart {
            Some(chart) => chart.points(reference_field, &self.timezone, range)?,
            None => BTreeMap::new(),
        };
        let reference = ReferenceSeries::new(self.reference.clone(), reference_points);

        info!(
            "Fetched {} trading days for {} of {} symbols ({:?} closes), reference {} with {} points",
            panel.num_dates(),
            panel.num_symbols(),
            symbols.len(),
            panel_field,
            self.reference,
            reference.len()
        );

        Ok(MarketData {
            panel,
            reference,
            panel_field,
            reference_field,
        })
    }
}
