//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - raw daily values: `#` bars from the baseline
//! - cumulative / smoothed series: `*` line
//! - annotation marker: `:` column at the marker date

use crate::domain::{AnnotationMarker, BuiltSeries, SeriesKind};

/// Render a built chart as a fixed-size character grid with a header line.
pub fn render_ascii_plot(
    built: &BuiltSeries,
    annotation: Option<&AnnotationMarker>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let n = built.primary.points.len();
    if n == 0 {
        return "(no data)\n".to_string();
    }

    let (y_min, y_max) = value_range(built);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    // A constant series still needs a nonzero span to map onto rows.
    let (y_min, y_max) = if y_max > y_min {
        (y_min, y_max)
    } else {
        (y_min - 1.0, y_max + 1.0)
    };

    let mut grid = vec![vec![' '; width]; height];

    // Marker column first so data can overlay it.
    if let Some(marker) = annotation {
        if let Some(i) = built
            .primary
            .points
            .iter()
            .position(|(d, _)| *d == marker.date)
        {
            let x = map_x(i, n, width);
            for row in grid.iter_mut() {
                row[x] = ':';
            }
        }
    }

    for series in built.series() {
        match series.kind {
            SeriesKind::DailyRaw => {
                // Bars grow from the zero line (or the bottom of the range
                // when zero is out of frame).
                let base = map_y(0.0f64.clamp(y_min, y_max), y_min, y_max, height);
                for (i, (_, v)) in series.points.iter().enumerate() {
                    let x = map_x(i, n, width);
                    let y = map_y(v.clamp(y_min, y_max), y_min, y_max, height);
                    let (top, bottom) = if y <= base { (y, base) } else { (base, y) };
                    for row in grid.iter_mut().take(bottom + 1).skip(top) {
                        row[x] = '#';
                    }
                }
            }
            SeriesKind::Cumulative | SeriesKind::DailySmoothed => {
                for (i, (_, v)) in series.points.iter().enumerate() {
                    let x = map_x(i, n, width);
                    let y = map_y(v.clamp(y_min, y_max), y_min, y_max, height);
                    grid[y][x] = '*';
                }
            }
        }
    }

    let first = built.primary.points[0].0;
    let last = built.primary.points[n - 1].0;
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: dates=[{first}, {last}] | y=[{y_min:.1}, {y_max:.1}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    if let Some(marker) = annotation {
        out.push_str(&format!(
            ": {} ({})\n",
            marker.label.replace('\n', " "),
            marker.date
        ));
    }

    out
}

fn value_range(built: &BuiltSeries) -> (f64, f64) {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for series in built.series() {
        for &(_, v) in &series.points {
            if v.is_finite() {
                min_v = min_v.min(v);
                max_v = max_v.max(v);
            }
        }
    }
    if !(min_v.is_finite() && max_v.is_finite()) {
        return (0.0, 1.0);
    }
    // Respect the axis floor policy from the series builder.
    if let Some(floor) = built.y_floor {
        min_v = min_v.max(floor);
        max_v = max_v.max(floor);
    }
    (min_v, max_v)
}

fn pad_range(min_v: f64, max_v: f64, frac: f64) -> (f64, f64) {
    let span = (max_v - min_v).abs();
    let pad = span * frac;
    (min_v - pad, max_v + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let frac = i as f64 / (n - 1) as f64;
    ((frac * (width - 1) as f64).round() as usize).min(width - 1)
}

fn map_y(v: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let frac = (v - y_min) / (y_max - y_min);
    let row = ((1.0 - frac) * (height - 1) as f64).round() as isize;
    row.clamp(0, height as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregationMode, RawPoint};
    use crate::transform::build_series;
    use chrono::NaiveDate;

    fn sample_built(mode: AggregationMode) -> BuiltSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let raw: Vec<RawPoint> = (0..30)
            .map(|i| RawPoint {
                date: start + chrono::Days::new(i),
                cumulative: (i * i) as f64,
                daily: (2 * i) as f64,
            })
            .collect();
        build_series(&raw, "cases", mode, 7).unwrap()
    }

    #[test]
    fn renders_expected_grid_dimensions() {
        let built = sample_built(AggregationMode::Cumulative);
        let plot = render_ascii_plot(&built, None, 40, 10);
        let lines: Vec<&str> = plot.lines().collect();
        // Header + grid rows.
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("Plot: dates=[2024-01-01, 2024-01-30]"));
        for row in &lines[1..] {
            assert_eq!(row.chars().count(), 40);
        }
    }

    #[test]
    fn daily_mode_draws_bars_and_line() {
        let built = sample_built(AggregationMode::Daily);
        let plot = render_ascii_plot(&built, None, 40, 12);
        assert!(plot.contains('#'));
        assert!(plot.contains('*'));
    }

    #[test]
    fn marker_column_is_drawn_and_footnoted() {
        let built = sample_built(AggregationMode::Cumulative);
        let marker = AnnotationMarker {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            label: "All provinces\nlast reported".to_string(),
        };
        let plot = render_ascii_plot(&built, Some(&marker), 40, 10);
        assert!(plot.contains(':'));
        assert!(plot.contains("All provinces last reported (2024-01-15)"));
    }

    #[test]
    fn deterministic_output() {
        let built = sample_built(AggregationMode::Daily);
        let a = render_ascii_plot(&built, None, 60, 15);
        let b = render_ascii_plot(&built, None, 60, 15);
        assert_eq!(a, b);
    }
}
