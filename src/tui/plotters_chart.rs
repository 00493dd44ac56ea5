//! Plotters-powered trend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. X values are day offsets from `start_date`; the
/// widget only formats them back into dates for tick labels.
pub struct TrendChart<'a> {
    /// Bar series (raw daily values); empty in cumulative mode.
    pub bars: &'a [(f64, f64)],
    /// Line series (cumulative totals or the smoothed daily average).
    pub line: &'a [(f64, f64)],
    /// X offset of the completeness marker line, if any.
    pub marker_x: Option<f64>,
    /// X bounds (day offsets).
    pub x_bounds: [f64; 2],
    /// Y bounds (metric units).
    pub y_bounds: [f64; 2],
    /// Date corresponding to x = 0.
    pub start_date: NaiveDate,
    /// Y-axis description (the series label).
    pub y_label: String,
    /// Baseline bars grow from (the axis floor, or zero when in frame).
    pub bar_baseline: f64,
}

impl<'a> Widget for TrendChart<'a> {
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

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let start_date = self.start_date;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 9)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. Mesh lines are disabled to reduce visual
            // clutter in low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_axis_date(start_date, *v))
                .y_label_formatter(&|v| fmt_axis_value(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let bar_color = RGBColor(80, 140, 220); // muted blue
            let line_color = RGBColor(255, 41, 41); // dashboard red
            let marker_color = RGBColor(255, 255, 0); // yellow

            // 1) Raw daily bars, drawn first so the lines overlay them.
            let half_width = bar_half_width(x0, x1, self.bars.len());
            chart.draw_series(self.bars.iter().map(|&(x, y)| {
                let (lo, hi) = if y >= self.bar_baseline {
                    (self.bar_baseline, y)
                } else {
                    (y, self.bar_baseline)
                };
                Rectangle::new(
                    [(x - half_width, lo), (x + half_width, hi)],
                    bar_color.filled(),
                )
            }))?;

            // 2) Completeness marker: a vertical reference line.
            if let Some(mx) = self.marker_x {
                chart.draw_series(LineSeries::new(
                    [(mx, y0), (mx, y1)],
                    &marker_color,
                ))?;
            }

            // 3) The line series on top.
            chart.draw_series(LineSeries::new(self.line.iter().copied(), &line_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn fmt_axis_date(start: NaiveDate, offset: f64) -> String {
    let days = offset.max(0.0).round() as u64;
    (start + chrono::Days::new(days)).format("%Y-%m").to_string()
}

fn fmt_axis_value(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.abs() >= 1_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else if v.abs() >= 10.0 || v == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn bar_half_width(x0: f64, x1: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.5;
    }
    // Bars should touch but not overlap when the series spans the full axis.
    let per_bar = (x1 - x0) / n as f64;
    (per_bar * 0.4).clamp(0.05, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_date_formatting() {
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        assert_eq!(fmt_axis_date(start, 0.0), "2020-03");
        assert_eq!(fmt_axis_date(start, 45.0), "2020-04");
        // Negative offsets (left padding) clamp to the start date.
        assert_eq!(fmt_axis_date(start, -3.0), "2020-03");
    }

    #[test]
    fn axis_value_formatting() {
        assert_eq!(fmt_axis_value(2_500_000.0), "2.5M");
        assert_eq!(fmt_axis_value(12_000.0), "12k");
        assert_eq!(fmt_axis_value(42.0), "42");
        assert_eq!(fmt_axis_value(0.3), "0.3");
    }

    #[test]
    fn bar_width_never_overlaps() {
        let hw = bar_half_width(0.0, 99.0, 100);
        assert!(hw * 2.0 <= 99.0 / 100.0 + 1e-9);
        assert!(bar_half_width(0.0, 10.0, 0) > 0.0);
    }
}
