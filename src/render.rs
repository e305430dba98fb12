//! Plain-text rendering of a breadth report for the terminal.

use crate::errors::BreadthError;
use crate::models::breadth::DisplayWindow;
use crate::models::report::{BreadthReport, Horizon, TableRow, WindowMetric};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget};
use std::fmt::Write;

const CHART_HEIGHT: u16 = 12;
const AXIS_LABEL_WIDTH: u16 = 6;
const GRID_LEVELS: [f64; 2] = [25.0, 75.0];

pub struct ChartStyle {
    pub width: u16,
    pub show_grid: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 60,
            show_grid: true,
        }
    }
}

pub fn format_metric(metric: &WindowMetric) -> String {
    format!(
        "> MM{:<3} {:>5.1}%  ({:+.1} p.p.)",
        metric.window,
        metric.latest,
        metric.delta.unwrap_or(0.0)
    )
}

/// Cell symbols of a rendered buffer, one line per row.
fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right()).map(|x| buf[(x, y)].symbol()).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Chart of one window's percentage on a fixed 0-100 scale with a guide at
/// 50%, followed by the date span and the last value.
pub fn render_chart(display: &DisplayWindow, window: usize, style: &ChartStyle) -> String {
    let series = display.series(window);
    let mut out = String::new();
    let (Some(&(first_date, _)), Some(&(last_date, last_value))) = (series.first(), series.last()) else {
        let _ = writeln!(out, "(no data for MM{})", window);
        return out;
    };

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, value))| (i as f64, *value))
        .collect();
    let x_max = points.len().saturating_sub(1).max(1) as f64;
    let guide = [(0.0, 50.0), (x_max, 50.0)];
    let grid: Vec<(f64, f64)> = if style.show_grid {
        (0..=10)
            .flat_map(|step| GRID_LEVELS.map(|level| (x_max * step as f64 / 10.0, level)))
            .collect()
    } else {
        Vec::new()
    };

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .data(&grid),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .data(&guide),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([0.0, 100.0]).labels(["0%", "50%", "100%"]));

    let area = Rect::new(0, 0, style.width.saturating_add(AXIS_LABEL_WIDTH), CHART_HEIGHT);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    out.push_str(&buffer_to_text(&buf));
    let _ = writeln!(out, "{} .. {}  last {:.1}%", first_date, last_date, last_value);
    out
}

pub fn render_reference(display: &DisplayWindow, name: &str) -> String {
    let levels: Vec<f64> = display.reference_series().iter().map(|(_, v)| *v).collect();
    match (levels.first(), levels.last()) {
        (Some(first), Some(last)) => {
            let min = levels.iter().copied().fold(f64::INFINITY, f64::min);
            let max = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let missing = display.len() - levels.len();
            let mut line = format!(
                "{}: last {:.0} | range {:.0} - {:.0} | change {:+.1}%",
                name,
                last,
                min,
                max,
                (last / first - 1.0) * 100.0
            );
            if missing > 0 {
                let _ = write!(line, " | {} dates without a quote", missing);
            }
            line
        }
        _ => format!("{}: no reference data on the displayed dates", name),
    }
}

pub fn render_table(rows: &[TableRow], windows: &[usize], limit: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<12}", "Date");
    for window in windows {
        let _ = write!(out, "{:>9}", format!("MM{}_Pct", window));
    }
    let _ = writeln!(out, "{:>14}", "Reference");
    let _ = writeln!(out, "{:-<width$}", "", width = 12 + 9 * windows.len() + 14);

    let skip = rows.len().saturating_sub(limit);
    for row in &rows[skip..] {
        let _ = write!(out, "{:<12}", row.date.to_string());
        for value in &row.values {
            let _ = write!(out, "{:>9.1}", value);
        }
        match row.reference {
            Some(level) => {
                let _ = writeln!(out, "{:>14.0}", level);
            }
            None => {
                let _ = writeln!(out, "{:>14}", "-");
            }
        }
    }
    if skip > 0 {
        let _ = writeln!(out, "... {} earlier rows not shown", skip);
    }
    out
}

pub fn render_report(report: &BreadthReport, reference_name: &str, style: &ChartStyle, table_limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Market breadth: {} monitored symbols ({} with data), {} trading days shown",
        report.universe_size,
        report.symbols_with_data,
        report.display.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Current market state");
    for metric in &report.metrics {
        let _ = writeln!(out, "  {}", format_metric(metric));
    }
    let _ = writeln!(out);

    let windows = report.windows();
    for horizon in Horizon::ALL {
        let in_horizon: Vec<usize> = windows
            .iter()
            .copied()
            .filter(|w| Horizon::of_window(*w) == horizon)
            .collect();
        if in_horizon.is_empty() {
            continue;
        }

        let _ = writeln!(out, "== {} ==", horizon.title());
        let _ = writeln!(out, "{}", horizon.description());
        for window in in_horizon {
            let _ = writeln!(out, "Stocks above the {}-day moving average", window);
            out.push_str(&render_chart(&report.display, window, style));
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out, "{}", render_reference(&report.display, reference_name));
    let _ = writeln!(out);
    out.push_str(&render_table(&report.rows, &windows, table_limit));
    out
}

/// Warning shown in place of the dashboard after a failed pass.
pub fn render_warning(error: &BreadthError) -> String {
    format!("WARNING: {}\n{}", error, error.user_hint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::breadth::{BreadthColumn, BreadthCount, BreadthTable};
    use chrono::NaiveDate;

    fn display() -> DisplayWindow {
        let dates: Vec<NaiveDate> = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .iter_days()
            .take(4)
            .collect();
        DisplayWindow {
            table: BreadthTable {
                dates,
                columns: vec![BreadthColumn {
                    window: 5,
                    counts: vec![
                        BreadthCount { above: 0, valid: 4 },
                        BreadthCount { above: 2, valid: 4 },
                        BreadthCount { above: 3, valid: 4 },
                        BreadthCount { above: 4, valid: 4 },
                    ],
                }],
            },
            reference: vec![Some(100.0), None, Some(110.0), Some(120.0)],
        }
    }

    #[test]
    fn test_chart_shape() {
        let chart = render_chart(&display(), 5, &ChartStyle::default());
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), CHART_HEIGHT as usize + 1);
        assert!(chart.contains("100%"));
        assert!(chart.contains("50%"));
        assert_eq!(lines[lines.len() - 1], "2024-07-01 .. 2024-07-04  last 100.0%");
    }

    #[test]
    fn test_grid_toggle_changes_chart() {
        let with_grid = render_chart(&display(), 5, &ChartStyle { width: 40, show_grid: true });
        let without = render_chart(&display(), 5, &ChartStyle { width: 40, show_grid: false });
        assert_ne!(with_grid, without);
        assert_eq!(with_grid.lines().count(), without.lines().count());
    }

    #[test]
    fn test_single_point_chart() {
        let mut single = display();
        single.table = single.table.select_rows(&[3]);
        single.reference = vec![Some(120.0)];
        let chart = render_chart(&single, 5, &ChartStyle::default());
        assert!(chart.ends_with("2024-07-04 .. 2024-07-04  last 100.0%\n"));
    }

    #[test]
    fn test_reference_without_quotes() {
        let mut display = display();
        display.reference = vec![None; 4];
        assert!(render_reference(&display, "^BVSP").contains("no reference data"));
    }

    #[test]
    fn test_chart_unknown_window() {
        assert!(render_chart(&display(), 200, &ChartStyle::default()).contains("no data"));
    }

    #[test]
    fn test_reference_summary() {
        let line = render_reference(&display(), "IBOV");
        assert!(line.contains("last 120"));
        assert!(line.contains("+20.0%"));
        assert!(line.contains("1 dates without a quote"));
    }

    #[test]
    fn test_metric_format() {
        let metric = WindowMetric { window: 20, latest: 61.24, delta: Some(-2.04) };
        assert_eq!(format_metric(&metric), "> MM20   61.2%  (-2.0 p.p.)");

        let single = WindowMetric { window: 5, latest: 40.0, delta: None };
        assert!(format_metric(&single).ends_with("(+0.0 p.p.)"));
    }

    #[test]
    fn test_table_limit() {
        let rows = vec![
            TableRow { date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), values: vec![10.0], reference: None },
            TableRow { date: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(), values: vec![20.0], reference: Some(5.0) },
        ];
        let table = render_table(&rows, &[5], 1);
        assert!(table.contains("MM5_Pct"));
        assert!(!table.contains("2024-07-01"));
        assert!(table.contains("2024-07-02"));
        assert!(table.contains("1 earlier rows not shown"));
    }
}
