//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line series: one glyph per series (first series drawn wins on overlap)
//! - scatter points: `o`
//! - optional zero axis: `.`

use crate::math::LineFit;

/// Glyphs assigned to line series in order.
pub const SERIES_GLYPHS: [char; 6] = ['*', '+', '#', 'x', '%', '@'];

/// One named line series.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub label: &'a str,
    pub points: &'a [(f64, f64)],
}

/// Render one or more line series on a shared grid with a legend.
pub fn render_line_plot(series: &[PlotSeries<'_>], width: usize, height: usize, zero_axis: bool) -> String {
    let all: Vec<(f64, f64)> = series.iter().flat_map(|s| s.points.iter().copied()).collect();
    let Some(bounds) = Bounds::from_points(&all) else {
        return "Plot: no data\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    for (s, glyph) in series.iter().zip(SERIES_GLYPHS.iter().cycle()) {
        draw_polyline(&mut grid, s.points, &bounds, *glyph);
    }
    if zero_axis {
        draw_zero_axis(&mut grid, &bounds);
    }

    let legend: Vec<String> = series
        .iter()
        .zip(SERIES_GLYPHS.iter().cycle())
        .map(|(s, g)| format!("{g} {}", s.label))
        .collect();

    finish(&bounds, &legend.join("  "), grid)
}

/// Render a scatter of `(x, y)` points with an optional fitted line.
pub fn render_scatter(points: &[(f64, f64)], fit: Option<LineFit>, width: usize, height: usize) -> String {
    let Some(bounds) = Bounds::from_points(points) else {
        return "Plot: no data\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    // Draw the fitted line first (so points can overlay).
    let legend = match fit {
        Some(line) => {
            let ends = [
                (bounds.x_min, line.predict(bounds.x_min)),
                (bounds.x_max, line.predict(bounds.x_max)),
            ];
            draw_polyline(&mut grid, &ends, &bounds, '-');
            format!("o observations  - fit: y = {:.4} + {:.4}x", line.intercept, line.slope)
        }
        None => "o observations".to_string(),
    };

    for &(x, y) in points {
        let col = map_x(x, &bounds, width);
        let row = map_y(y, &bounds, height);
        grid[row][col] = 'o';
    }

    finish(&bounds, &legend, grid)
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(x, y) in points {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !(x_min.is_finite() && y_min.is_finite()) {
            return None;
        }
        if x_max <= x_min {
            x_min -= 0.5;
            x_max += 0.5;
        }
        let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
        Some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

fn finish(bounds: &Bounds, legend: &str, grid: Vec<Vec<char>>) -> String {
    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{:.2}, {:.2}] | y=[{:.4}, {:.4}]\n",
        bounds.x_min, bounds.x_max, bounds.y_min, bounds.y_max
    ));
    out.push_str(legend);
    out.push('\n');

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, b: &Bounds, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - b.x_min) / (b.x_max - b.x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, b: &Bounds, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - b.y_min) / (b.y_max - b.y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_zero_axis(grid: &mut [Vec<char>], b: &Bounds) {
    if !(b.y_min < 0.0 && b.y_max > 0.0) {
        return;
    }
    let row = map_y(0.0, b, grid.len());
    for cell in grid[row].iter_mut() {
        if *cell == ' ' {
            *cell = '.';
        }
    }
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[(f64, f64)], b: &Bounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let col = map_x(x, b, width);
        let row = map_y(y, b, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_plot_golden_snapshot_small() {
        let rising = [(0.0, 0.0), (9.0, 4.0)];
        let flat = [(0.0, 2.0), (9.0, 2.0)];
        let txt = render_line_plot(
            &[
                PlotSeries { label: "up", points: &rising },
                PlotSeries { label: "flat", points: &flat },
            ],
            10,
            5,
            false,
        );
        let expected = concat!(
            "Plot: x=[0.00, 9.00] | y=[-0.2000, 4.2000]\n",
            "* up  + flat\n",
            "        **\n",
            "      **\n",
            "++++**++++\n",
            "  **\n",
            "**\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn zero_axis_fills_blank_cells_only() {
        let wave = [(0.0, -1.0), (1.0, 1.0), (2.0, -1.0)];
        let txt = render_line_plot(&[PlotSeries { label: "c", points: &wave }], 10, 5, true);
        let rows: Vec<&str> = txt.lines().skip(2).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[2].contains('.'));
        assert!(rows[2].contains('*'));
    }

    #[test]
    fn scatter_draws_points_and_fit() {
        let pts = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let fit = LineFit {
            intercept: 0.0,
            slope: 1.0,
        };
        let txt = render_scatter(&pts, Some(fit), 10, 5);
        assert!(txt.contains("fit: y = 0.0000 + 1.0000x"));
        let points_drawn: usize = txt.lines().skip(2).map(|l| l.matches('o').count()).sum();
        assert_eq!(points_drawn, 3);
    }

    #[test]
    fn empty_input_is_reported() {
        assert_eq!(render_line_plot(&[], 10, 5, false), "Plot: no data\n");
    }
}
