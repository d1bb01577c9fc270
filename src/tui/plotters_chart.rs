//! Plotters-powered time-series / scatter / bar chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// High-contrast palette for terminal rendering, assigned to lines in order.
pub const LINE_COLORS: [RGBColor; 4] = [
    RGBColor(0, 255, 255), // cyan
    RGBColor(255, 200, 0), // amber
    RGBColor(160, 160, 160),
    RGBColor(255, 0, 255),
];

/// One vertical bar from `y = 0` to `height`, centred on `x`.
pub struct ChartBar {
    pub x: f64,
    pub height: f64,
    pub color: RGBColor,
}

/// Half of a bar's width in x units.
const BAR_HALF_WIDTH: f64 = 0.3;

/// One polyline of the chart.
pub struct ChartLine<'a> {
    pub points: &'a [(f64, f64)],
    pub color: RGBColor,
}

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct CyclePlottersChart<'a> {
    pub lines: &'a [ChartLine<'a>],
    /// Drawn as white dots on top of the lines.
    pub scatter: &'a [(f64, f64)],
    pub bars: &'a [ChartBar],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Draw a horizontal line at `y = 0` when it is inside the bounds.
    pub zero_line: bool,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for CyclePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            if self.zero_line && y0 < 0.0 && y1 > 0.0 {
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &RGBColor(90, 90, 90)))?;
            }

            chart.draw_series(self.bars.iter().map(|bar| {
                Rectangle::new(
                    [(bar.x - BAR_HALF_WIDTH, 0.0), (bar.x + BAR_HALF_WIDTH, bar.height)],
                    bar.color.filled(),
                )
            }))?;

            for line in self.lines {
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &line.color))?;
            }

            // `Pixel` rather than `Circle`: the ratatui backend maps circle radii
            // to canvas units incorrectly and produces huge markers.
            chart.draw_series(self.scatter.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
