use market_breadth::config::{Config, MAX_DISPLAY_DAYS, MIN_DISPLAY_DAYS};
use market_breadth::data_provider::MarketDataProvider;
use market_breadth::fetchers::YahooFetcher;
use market_breadth::render::{self, ChartStyle};
use market_breadth::services::BreadthService;
use market_breadth::universe::SymbolUniverse;

use anyhow::{bail, Context};
use clap::{Arg, ArgMatches, Command};
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line typed into the interactive dashboard.
#[derive(Debug, PartialEq)]
enum SessionCommand {
    Days(usize),
    Grid(bool),
    Refresh,
    Help,
    Quit,
}

impl SessionCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next().map(str::to_lowercase);

        match (command.as_str(), argument.as_deref()) {
            ("days", Some(n)) => n
                .parse::<usize>()
                .map(SessionCommand::Days)
                .map_err(|_| format!("not a number of days: {}", n)),
            ("grid", Some("on")) => Ok(SessionCommand::Grid(true)),
            ("grid", Some("off")) => Ok(SessionCommand::Grid(false)),
            ("refresh" | "r", None) => Ok(SessionCommand::Refresh),
            ("help" | "?", None) => Ok(SessionCommand::Help),
            ("quit" | "exit" | "q", None) => Ok(SessionCommand::Quit),
            _ => Err(format!("unknown command: {}", line.trim())),
        }
    }
}

const SESSION_HELP: &str = "Commands: days <N> | grid on|off | refresh | help | quit";

fn build_service(config: Config) -> anyhow::Result<BreadthService> {
    let fetcher = Arc::new(YahooFetcher::new(&config).context("failed to build HTTP client")?);
    let provider = MarketDataProvider::new(fetcher, config.cache_ttl);
    let universe = SymbolUniverse::from_raw_lists(
        &market_breadth::universe::b3::RAW_LISTS,
        &config.exchange_suffix,
    );
    Ok(BreadthService::new(config, universe, provider)?)
}

fn display_days_arg(matches: &ArgMatches) -> anyhow::Result<usize> {
    let raw = matches.value_of("days").unwrap_or("365");
    let days = raw
        .parse::<usize>()
        .with_context(|| format!("invalid --days value: {}", raw))?;
    Ok(Config::validate_display_days(days)?)
}

/// Run one pass and print it, or print the warning state.
async fn run_pass(service: &BreadthService, display_days: usize, style: &ChartStyle, rows: usize) -> bool {
    match service.compute_now(display_days).await {
        Ok(report) => {
            println!(
                "{}",
                render::render_report(&report, &service.config().reference_symbol, style, rows)
            );
            true
        }
        Err(e) => {
            error!("Computation pass failed: {}", e);
            println!("{}", render::render_warning(&e));
            false
        }
    }
}

async fn run_dashboard(service: BreadthService, mut display_days: usize, mut show_grid: bool) -> market_breadth::Result<()> {
    println!("{}", SESSION_HELP);
    run_pass(&service, display_days, &ChartStyle { width: 60, show_grid }, 15).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match SessionCommand::parse(&line) {
            Ok(SessionCommand::Days(days)) => match Config::validate_display_days(days) {
                Ok(days) => display_days = days,
                Err(e) => {
                    println!("{}", render::render_warning(&e));
                    continue;
                }
            },
            Ok(SessionCommand::Grid(on)) => show_grid = on,
            Ok(SessionCommand::Refresh) => {
                info!("Manual refresh requested");
                service.refresh();
            }
            Ok(SessionCommand::Help) => {
                println!("{}", SESSION_HELP);
                continue;
            }
            Ok(SessionCommand::Quit) => break,
            Err(message) => {
                println!("{}\n{}", message, SESSION_HELP);
                continue;
            }
        }

        run_pass(&service, display_days, &ChartStyle { width: 60, show_grid }, 15).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let days_help = format!(
        "Display lookback in trading days ({}-{})",
        MIN_DISPLAY_DAYS, MAX_DISPLAY_DAYS
    );
    let days_arg = Arg::new("days")
        .short('d')
        .long("days")
        .value_name("DAYS")
        .help(days_help.as_str())
        .takes_value(true)
        .default_value("365");
    let no_grid_arg = Arg::new("no-grid")
        .long("no-grid")
        .help("Hide gridlines in the charts")
        .takes_value(false);

    let app = Command::new("market_breadth")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Percentage of B3 stocks trading above their moving averages")
        .arg(
            Arg::new("ttl")
                .long("ttl")
                .value_name("SECONDS")
                .help("How long fetched prices stay cached")
                .takes_value(true)
                .global(true)
                .default_value("3600"),
        )
        .arg(
            Arg::new("reference")
                .long("reference")
                .value_name("SYMBOL")
                .help("Reference index plotted alongside breadth")
                .takes_value(true)
                .global(true)
                .default_value("^BVSP"),
        )
        .subcommand(
            Command::new("report")
                .about("Compute breadth once and print the report")
                .arg(days_arg.clone())
                .arg(no_grid_arg.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .takes_value(false),
                )
                .arg(
                    Arg::new("rows")
                        .short('r')
                        .long("rows")
                        .value_name("ROWS")
                        .help("Number of table rows to print")
                        .takes_value(true)
                        .default_value("15"),
                ),
        )
        .subcommand(Command::new("symbols").about("List the monitored symbols"))
        .subcommand(
            Command::new("dashboard")
                .about("Interactive session; recomputes on every parameter change or refresh")
                .arg(days_arg)
                .arg(no_grid_arg),
        );

    let matches = app.get_matches();

    let ttl = matches
        .value_of("ttl")
        .unwrap_or("3600")
        .parse::<u64>()
        .context("invalid --ttl value")?;
    let reference = matches.value_of("reference").unwrap_or("^BVSP");
    let config = Config::new()
        .with_cache_ttl(Duration::from_secs(ttl))
        .with_reference_symbol(reference);

    match matches.subcommand() {
        Some(("symbols", _)) => {
            let universe = SymbolUniverse::from_raw_lists(
                &market_breadth::universe::b3::RAW_LISTS,
                &config.exchange_suffix,
            );
            println!("Total: {}", universe.len());
            println!("{}", universe.tickers().join(", "));
        }
        Some(("report", sub)) => {
            let display_days = display_days_arg(sub)?;
            let show_grid = !sub.is_present("no-grid");
            let rows = sub
                .value_of("rows")
                .unwrap_or("15")
                .parse::<usize>()
                .context("invalid --rows value")?;
            let service = build_service(config.with_display_days(display_days).with_show_grid(show_grid))?;

            if sub.is_present("json") {
                match service.compute_now(display_days).await {
                    Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                    Err(e) => {
                        println!("{}", render::render_warning(&e));
                        return Err(e.into());
                    }
                }
            } else if !run_pass(&service, display_days, &ChartStyle { width: 60, show_grid }, rows).await {
                bail!("breadth report could not be computed");
            }
        }
        Some(("dashboard", sub)) => {
            let display_days = display_days_arg(sub)?;
            let show_grid = !sub.is_present("no-grid");
            let service = build_service(config.with_display_days(display_days).with_show_grid(show_grid))?;
            run_dashboard(service, display_days, show_grid).await?;
        }
        _ => {
            info!("No command specified. Use --help for usage information.");
        }
    }

    Ok(())
}
