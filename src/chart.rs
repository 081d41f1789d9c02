//! Log-log line charts rendered as standalone SVG.
//!
//! Both axes are logarithmic with gridlines on whole decades. Each pivot
//! column becomes one series and one legend entry; a series with a single
//! point is drawn as a lone marker. Non-positive values have no place on a
//! log axis and are left out of the plot (the console table still shows them).

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::pivot::{Metric, PivotTable};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 200.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 56.0;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub metric: Metric,
    pub title: String,
    pub svg: String,
}

/// Whole-decade range `[10^lo, 10^hi]` covering every value, `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LogAxis {
    lo: i32,
    hi: i32,
}

impl LogAxis {
    fn covering(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max) = values
            .filter(|v| *v > 0.0 && v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        let lo = min.log10().floor() as i32;
        let mut hi = max.log10().ceil() as i32;
        if hi <= lo {
            hi = lo + 1;
        }
        Some(Self { lo, hi })
    }

    /// Position of `v` in `[0, 1]` along the axis.
    fn frac(&self, v: f64) -> f64 {
        (v.log10() - self.lo as f64) / (self.hi - self.lo) as f64
    }

    fn decades(&self) -> impl Iterator<Item = i32> {
        self.lo..=self.hi
    }
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn plot_x(axis: &LogAxis, v: f64) -> f64 {
    MARGIN_LEFT + axis.frac(v) * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
}

fn plot_y(axis: &LogAxis, v: f64) -> f64 {
    HEIGHT - MARGIN_BOTTOM - axis.frac(v) * (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
}

/// Render one chart for `table`, or `None` if it has nothing plottable.
pub fn render(table: &PivotTable) -> Option<Chart> {
    let points: Vec<(usize, f64)> = (0..table.columns.len())
        .flat_map(|c| table.series(c))
        .filter(|(n, v)| *n > 0 && *v > 0.0)
        .collect();
    let x_axis = LogAxis::covering(points.iter().map(|(n, _)| *n as f64))?;
    let y_axis = LogAxis::covering(points.iter().map(|(_, v)| *v))?;

    let mut svg = String::new();
    write_svg(&mut svg, table, &x_axis, &y_axis).ok()?;

    Some(Chart {
        metric: table.metric,
        title: table.metric.title().to_string(),
        svg,
    })
}

fn write_svg(
    out: &mut String,
    table: &PivotTable,
    x_axis: &LogAxis,
    y_axis: &LogAxis,
) -> fmt::Result {
    let plot_right = WIDTH - MARGIN_RIGHT;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="16">{}</text>"#,
        (MARGIN_LEFT + plot_right) / 2.0,
        esc(table.metric.title())
    )?;

    // Decade gridlines and labels.
    for k in x_axis.decades() {
        let x = plot_x(x_axis, 10f64.powi(k));
        writeln!(
            out,
            r##"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{plot_bottom}" stroke="#ddd"/>"##
        )?;
        writeln!(
            out,
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle">10<tspan dy="-5" font-size="9">{k}</tspan></text>"#,
            plot_bottom + 18.0
        )?;
    }
    for k in y_axis.decades() {
        let y = plot_y(y_axis, 10f64.powi(k));
        writeln!(
            out,
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{plot_right}" y2="{y:.1}" stroke="#ddd"/>"##
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">10<tspan dy="-5" font-size="9">{k}</tspan></text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0
        )?;
    }
    writeln!(
        out,
        r#"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        plot_right - MARGIN_LEFT,
        plot_bottom - MARGIN_TOP
    )?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">n_values</text>"#,
        (MARGIN_LEFT + plot_right) / 2.0,
        HEIGHT - 12.0
    )?;
    writeln!(
        out,
        r#"<text x="16" y="{:.1}" text-anchor="middle" transform="rotate(-90 16 {:.1})">{}</text>"#,
        (MARGIN_TOP + plot_bottom) / 2.0,
        (MARGIN_TOP + plot_bottom) / 2.0,
        esc(table.metric.unit())
    )?;

    for (col, name) in table.columns.iter().enumerate() {
        let color = PALETTE[col % PALETTE.len()];
        let pts: Vec<(f64, f64)> = table
            .series(col)
            .into_iter()
            .filter(|(n, v)| *n > 0 && *v > 0.0)
            .map(|(n, v)| (plot_x(x_axis, n as f64), plot_y(y_axis, v)))
            .collect();

        writeln!(out, r#"<g class="series" data-function="{}">"#, esc(name))?;
        if pts.len() > 1 {
            let path: Vec<String> = pts.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
            writeln!(
                out,
                r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
                path.join(" ")
            )?;
        }
        for (x, y) in &pts {
            writeln!(out, r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#)?;
        }
        writeln!(out, "</g>")?;

        let ly = MARGIN_TOP + 12.0 + col as f64 * 18.0;
        let lx = plot_right + 16.0;
        writeln!(
            out,
            r#"<line x1="{lx:.1}" y1="{ly:.1}" x2="{:.1}" y2="{ly:.1}" stroke="{color}" stroke-width="2"/>"#,
            lx + 20.0
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
            lx + 26.0,
            ly + 4.0,
            esc(name)
        )?;
    }

    writeln!(out, "</svg>")
}
