//! Ratatui-based terminal UI.
//!
//! The TUI fetches and aligns the two series once, then lets the user step
//! through smoothing parameters and switch between the cycle, trend,
//! scatter and volatility views. Every λ change reruns the filter on the cached log levels.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::{compare_aligned, fetch_aligned, AlignedPair, CompareOutput};
use crate::cycle::fit_cycle_regression;
use crate::data::provider_for;
use crate::domain::CompareConfig;
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartBar, ChartLine, CyclePlottersChart, LINE_COLORS};

/// Smoothing parameters offered by ←/→ (annual, quarterly and monthly conventions included).
const LAMBDA_PRESETS: [f64; 8] = [6.25, 10.0, 100.0, 400.0, 1600.0, 6400.0, 14400.0, 129600.0];

/// Start the TUI.
pub fn run(config: CompareConfig) -> Result<(), AppError> {
    // Fetch before touching the terminal so provider errors print normally.
    let provider = provider_for(config.data_dir.as_deref())?;
    let pair = fetch_aligned(provider.as_ref(), &config)?;
    let mut app = App::new(config, pair);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Cycles,
    Trends,
    Scatter,
    Volatility,
}

impl View {
    fn next(self) -> Self {
        match self {
            Self::Cycles => Self::Trends,
            Self::Trends => Self::Scatter,
            Self::Scatter => Self::Volatility,
            Self::Volatility => Self::Cycles,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Cycles => "Cycles",
            Self::Trends => "Log levels and trends",
            Self::Scatter => "Cycle scatter with regression line",
            Self::Volatility => "Cycle volatility (standard deviation)",
        }
    }
}

struct App {
    config: CompareConfig,
    pair: AlignedPair,
    lambdas: Vec<f64>,
    lambda_idx: usize,
    view: View,
    status: String,
    run: Option<CompareOutput>,
}

impl App {
    fn new(config: CompareConfig, pair: AlignedPair) -> Self {
        let (lambdas, lambda_idx) = lambda_presets(config.lambda);
        let mut app = Self {
            config,
            pair,
            lambdas,
            lambda_idx,
            view: View::Cycles,
            status: String::new(),
            run: None,
        };
        app.refilter();
        app
    }

    fn lambda(&self) -> f64 {
        self.lambdas[self.lambda_idx]
    }

    /// Rerun the filter for the current λ. Analysis errors stay on screen.
    fn refilter(&mut self) {
        match compare_aligned(&self.pair, self.lambda()) {
            Ok(run) => {
                self.status = format!("lambda = {}", self.lambda());
                self.run = Some(run);
            }
            Err(err) => {
                self.status = format!("lambda = {}: {err}", self.lambda());
                self.run = None;
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => {
                if self.lambda_idx > 0 {
                    self.lambda_idx -= 1;
                    self.refilter();
                }
            }
            KeyCode::Right => {
                if self.lambda_idx + 1 < self.lambdas.len() {
                    self.lambda_idx += 1;
                    self.refilter();
                }
            }
            KeyCode::Char('v') | KeyCode::Tab => {
                self.view = self.view.next();
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("hpc", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                ": {} vs {} | {} .. {} | lambda = {}",
                self.config.series_a,
                self.config.series_b,
                self.pair.a.first_date().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                self.pair.a.last_date().map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                self.lambda(),
            )),
        ]));

        if let Some(run) = &self.run {
            let s = &run.summary;
            lines.push(Line::from(Span::styled(
                format!(
                    "std: {:.4} / {:.4} | ratio {:.3} | corr {:.4} ({}) | n={}",
                    s.std_a, s.std_b, s.std_ratio, s.correlation, s.strength, s.n_obs
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.view.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No decomposition for this lambda.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let data = chart_data(self.view, &self.pair, run);
        let lines: Vec<ChartLine<'_>> = data
            .lines
            .iter()
            .zip(LINE_COLORS.iter().cycle())
            .map(|(points, color)| ChartLine {
                points,
                color: *color,
            })
            .collect();
        let bars: Vec<ChartBar> = data
            .bars
            .iter()
            .zip(LINE_COLORS)
            .map(|(&(x, height), color)| ChartBar { x, height, color })
            .collect();

        let (chart_rect, insets) = chart_layout(inner);
        let widget = CyclePlottersChart {
            lines: &lines,
            scatter: &data.scatter,
            bars: &bars,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            zero_line: self.view == View::Cycles,
            x_label: data.x_label,
            y_label: data.y_label,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &data);
            if self.view == View::Volatility {
                draw_bar_names(frame, chart_rect, &data, [run.summary.name_a.as_str(), run.summary.name_b.as_str()]);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ lambda  v view  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Presets plus the requested λ (if it is not already one), sorted, and the index of the requested λ.
fn lambda_presets(requested: f64) -> (Vec<f64>, usize) {
    let mut lambdas = LAMBDA_PRESETS.to_vec();
    if !lambdas.contains(&requested) {
        lambdas.push(requested);
        lambdas.sort_by(f64::total_cmp);
    }
    let idx = lambdas.iter().position(|&l| l == requested).unwrap_or(0);
    (lambdas, idx)
}

/// Series and bounds for one view, computed outside the render call.
struct ChartData {
    lines: Vec<Vec<(f64, f64)>>,
    scatter: Vec<(f64, f64)>,
    /// `(x, height)` per bar; bars grow from zero.
    bars: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'static str,
    y_label: &'static str,
}

fn chart_data(view: View, pair: &AlignedPair, run: &CompareOutput) -> ChartData {
    let (lines, scatter, x_label, y_label) = match view {
        View::Cycles => (
            vec![run.a.cycle.xy(), run.b.cycle.xy()],
            Vec::new(),
            "year",
            "log dev",
        ),
        View::Trends => (
            vec![pair.a.xy(), run.a.trend.xy(), pair.b.xy(), run.b.trend.xy()],
            Vec::new(),
            "year",
            "log level",
        ),
        View::Scatter => {
            let xa = run.a.cycle.values();
            let yb = run.b.cycle.values();
            let scatter: Vec<(f64, f64)> = xa.iter().copied().zip(yb.iter().copied()).collect();
            let fit = fit_cycle_regression(&run.a.cycle, &run.b.cycle).map(|line| {
                let lo = xa.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = xa.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                vec![(lo, line.predict(lo)), (hi, line.predict(hi))]
            });
            (fit.into_iter().collect(), scatter, "cycle A", "cycle B")
        }
        View::Volatility => return volatility_bars(run),
    };

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in lines.iter().flatten().chain(scatter.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        x_min = 0.0;
        x_max = 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = -1.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartData {
        lines,
        scatter,
        bars: Vec::new(),
        x_bounds: [x_min, x_max],
        y_bounds: [y_min - pad, y_max + pad],
        x_label,
        y_label,
    }
}

/// Two bars at x = 0 and x = 1 with the cycle standard deviations.
fn volatility_bars(run: &CompareOutput) -> ChartData {
    let (std_a, std_b) = (run.summary.std_a, run.summary.std_b);
    let top = std_a.max(std_b);
    let top = if top.is_finite() && top > 0.0 { top * 1.15 } else { 1.0 };

    ChartData {
        lines: Vec::new(),
        scatter: Vec::new(),
        bars: vec![(0.0, std_a), (1.0, std_b)],
        x_bounds: [-0.6, 1.6],
        y_bounds: [0.0, top],
        x_label: "series",
        y_label: "std",
    }
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(frame: &mut ratatui::Frame<'_>, inner: Rect, chart: Rect, insets: AxisInsets, data: &ChartData) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = data.x_bounds;
    let [y0, y1] = data.y_bounds;

    let x_ticks = if data.bars.is_empty() { ticks } else { 0 };
    for i in 0..x_ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x0 + u * (x1 - x0);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = if data.x_label == "year" {
            format!("{x_val:.0}")
        } else {
            format!("{x_val:.3}")
        };
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y0 + u * (y1 - y0);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.3}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(data.x_label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(data.y_label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

/// Series names under each bar, in place of numeric x ticks.
fn draw_bar_names(frame: &mut ratatui::Frame<'_>, chart: Rect, data: &ChartData, names: [&str; 2]) {
    let [x0, x1] = data.x_bounds;
    for (&(x, _), name) in data.bars.iter().zip(names) {
        let u = (x - x0) / (x1 - x0);
        let centre = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let width = (name.len() as u16).min(chart.width);
        let start = centre.saturating_sub(width / 2).max(chart.x);
        frame.render_widget(
            Paragraph::new(name.to_string()).style(Style::default().fg(Color::Gray)),
            Rect {
                x: start,
                y: chart.y + chart.height,
                width,
                height: 1,
            },
        );
    }
}
