//! Ratatui-based terminal UI.
//!
//! The TUI mirrors the web dashboard: selectors for metric, region, and
//! aggregation mode, a chart that redraws on every change, and the data note
//! underneath. Selector changes re-fetch from the API; mode/window changes
//! rebuild from the cached raw series.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::cli::ShowArgs;
use crate::data::CovidDataClient;
use crate::domain::{AnnotationMarker, MetricDescriptor, RawPoint, SeriesKind, ShowConfig};
use crate::error::AppError;
use crate::transform::labels::{metric_base_name, supported_metric_ids};

mod plotters_chart;

use plotters_chart::TrendChart;

/// Start the TUI.
pub fn run(args: ShowArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(crate::app::show_config_from_args(&args));
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const FIELD_METRIC: usize = 0;
const FIELD_REGION: usize = 1;
const FIELD_MODE: usize = 2;
const FIELD_WINDOW: usize = 3;

struct App {
    client: CovidDataClient,
    config: ShowConfig,
    catalog: Vec<MetricDescriptor>,
    metric_idx: usize,
    selected_field: usize,
    status: String,
    raw: Option<Vec<RawPoint>>,
    run: Option<RunOutput>,
    /// The marker currently displayed; survives redraws that yield none when
    /// `config.preserve_annotation` is set.
    marker: Option<AnnotationMarker>,
}

impl App {
    fn new(config: ShowConfig) -> Self {
        let client = CovidDataClient::new();

        // The catalog only feeds the selector; if it cannot be fetched we
        // fall back to the fixed label table rather than failing to start.
        let (mut catalog, status) = match client.fetch_metric_catalog() {
            Ok(catalog) => (catalog, "Fetching data...".to_string()),
            Err(err) => (fallback_catalog(), format!("Catalog unavailable ({err})")),
        };

        // Honor a supported --metric even when the catalog omits it.
        let metric_idx = match catalog.iter().position(|m| m.id == config.metric) {
            Some(i) => i,
            None if crate::transform::is_supported_metric(&config.metric) => {
                catalog.insert(
                    0,
                    MetricDescriptor {
                        id: config.metric.clone(),
                        display_name: metric_base_name(&config.metric)
                            .map(str::to_string)
                            .unwrap_or_else(|_| config.metric.clone()),
                    },
                );
                0
            }
            None => 0,
        };

        let mut app = Self {
            client,
            config,
            catalog,
            metric_idx,
            selected_field: FIELD_METRIC,
            status,
            raw: None,
            run: None,
            marker: None,
        };
        app.config.metric = app.catalog[app.metric_idx].id.clone();
        app.refetch();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                self.selected_field = (self.selected_field + 1).min(FIELD_WINDOW);
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('a') => {
                self.config.preserve_annotation = !self.config.preserve_annotation;
                self.status = format!(
                    "keep annotation across redraws: {}",
                    if self.config.preserve_annotation { "on" } else { "off" }
                );
                self.rebuild();
            }
            KeyCode::Char('r') => self.refetch(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_METRIC => {
                let n = self.catalog.len();
                self.metric_idx = if delta >= 0 {
                    (self.metric_idx + 1) % n
                } else {
                    (self.metric_idx + n - 1) % n
                };
                self.config.metric = self.catalog[self.metric_idx].id.clone();
                self.refetch();
            }
            FIELD_REGION => {
                self.config.region = if delta >= 0 {
                    self.config.region.next()
                } else {
                    self.config.region.prev()
                };
                self.refetch();
            }
            FIELD_MODE => {
                self.config.mode = self.config.mode.toggle();
                self.rebuild();
            }
            FIELD_WINDOW => {
                let next = if delta >= 0 {
                    self.config.window.saturating_add(1)
                } else {
                    self.config.window.saturating_sub(1)
                };
                self.config.window = next.max(1);
                self.rebuild();
            }
            _ => {}
        }
    }

    /// Re-fetch the raw series for the current (metric, region), then rebuild.
    fn refetch(&mut self) {
        self.status = format!(
            "Fetching {} for {}...",
            self.config.metric,
            self.config.region.code()
        );
        match self
            .client
            .fetch_timeseries(&self.config.metric, self.config.region)
        {
            Ok(raw) => {
                self.raw = Some(raw);
                self.rebuild();
            }
            Err(err) => {
                self.raw = None;
                self.run = None;
                self.status = format!("Fetch failed: {err}");
            }
        }
    }

    /// Rebuild derived series from the cached raw series.
    ///
    /// A failure degrades to a status message; the previous chart stays up.
    fn rebuild(&mut self) {
        let Some(raw) = &self.raw else {
            return;
        };

        match crate::app::pipeline::run_show_with_raw(&self.client, &self.config, raw.clone()) {
            Ok(run) => {
                // Annotation persistence policy: a redraw that yields no new
                // marker keeps the old one only when the user asked for that.
                if run.annotation.is_some() {
                    self.marker = run.annotation.clone();
                } else if !self.config.preserve_annotation {
                    self.marker = None;
                }
                self.status = format!("{} | n={}", run.title, run.raw.len());
                self.run = Some(run);
            }
            Err(err) => {
                self.run = None;
                self.status = format!("Transform failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ctc", Style::default().fg(Color::Cyan)),
            Span::raw(" — Canadian COVID-19 trends"),
        ]));

        let title = self
            .run
            .as_ref()
            .map(|r| r.title.clone())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Trend").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let Some(prep) = chart_series(run, self.marker.as_ref()) else {
            let msg = Paragraph::new("No data points to chart.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let widget = TrendChart {
            bars: &prep.bars,
            line: &prep.line,
            marker_x: prep.marker_x,
            x_bounds: prep.x_bounds,
            y_bounds: prep.y_bounds,
            start_date: prep.start_date,
            y_label: prep.y_label.clone(),
            bar_baseline: prep.bar_baseline,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let metric = &self.catalog[self.metric_idx];

        let mut items = Vec::new();
        items.push(ListItem::new(format!(
            "Metric: {} ({})",
            metric.display_name, metric.id
        )));
        items.push(ListItem::new(format!(
            "Region: {} ({})",
            self.config.region.display_name(),
            self.config.region.code()
        )));
        items.push(ListItem::new(format!("Mode: {:?}", self.config.mode)));
        items.push(ListItem::new(format!("Window: {} days", self.config.window)));

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let note = self
            .run
            .as_ref()
            .map(|r| r.note.as_str())
            .unwrap_or("");
        let help = "↑/↓ select  ←/→ adjust  a annotation  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            Span::raw(note),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Selector list used when the catalog endpoint is unreachable.
fn fallback_catalog() -> Vec<MetricDescriptor> {
    supported_metric_ids()
        .map(|id| MetricDescriptor {
            id: id.to_string(),
            display_name: metric_base_name(id).unwrap_or(id).to_string(),
        })
        .collect()
}

/// Chart-ready series: x values are day offsets from the first date.
struct ChartPrep {
    bars: Vec<(f64, f64)>,
    line: Vec<(f64, f64)>,
    marker_x: Option<f64>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    start_date: chrono::NaiveDate,
    y_label: String,
    bar_baseline: f64,
}

fn chart_series(run: &RunOutput, marker: Option<&AnnotationMarker>) -> Option<ChartPrep> {
    let first = run.built.primary.points.first()?.0;
    let last = run.built.primary.points.last()?.0;
    let to_x = |d: chrono::NaiveDate| (d - first).num_days() as f64;

    let mut bars = Vec::new();
    let mut line = Vec::new();
    let mut y_label = run.built.primary.label.clone();
    for series in run.built.series() {
        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|&(d, v)| (to_x(d), v))
            .collect();
        match series.kind {
            SeriesKind::DailyRaw => bars = points,
            SeriesKind::Cumulative => line = points,
            SeriesKind::DailySmoothed => {
                y_label = format!("{} / {}", run.built.primary.label, series.label);
                line = points;
            }
        }
    }

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(_, v) in bars.iter().chain(&line) {
        if v.is_finite() {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    if !(y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if let Some(floor) = run.built.y_floor {
        y_min = y_min.max(floor);
        y_max = y_max.max(floor);
    }
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    let pad = (y_max - y_min) * 0.05;

    let marker_x = marker
        .filter(|m| m.date >= first && m.date <= last)
        .map(|m| to_x(m.date));

    let bar_baseline = run.built.y_floor.unwrap_or(0.0).clamp(y_min, y_max);

    Some(ChartPrep {
        bars,
        line,
        marker_x,
        x_bounds: [0.0, to_x(last).max(1.0)],
        y_bounds: [y_min - pad, y_max + pad],
        start_date: first,
        y_label,
        bar_baseline,
    })
}
