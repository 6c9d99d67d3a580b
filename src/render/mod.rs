// CC-Traces: Throughput, Loss and RTT Plots for Congestion-Control Emulation Traces
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Renders the throughput, loss and RTT-vs-throughput charts to PNG files.
//!
//! Every chart owns its drawing area, which is presented (written to disk) and dropped before the
//! function returns.

use std::{ops::Range, path::Path};

use plotters::{
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    drawing::DrawingAreaErrorKind,
    prelude::*,
};

use crate::records::{LossSeries, SummaryRow, TimeSeries};

pub mod html;

/// Size of all generated images in pixels.
pub const CHART_SIZE: (u32, u32) = (1024, 768);
/// Relative padding added around the data on each axis.
const PADDING: f64 = 0.05;
const FONT: &str = "sans-serif";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Plotting Error: {0}")]
    Plotting(String),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Plotting(e.to_string())
    }
}

/// Labels of a chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

impl<'a> ChartLabels<'a> {
    pub fn throughput(title: &'a str) -> Self {
        Self {
            title,
            x_desc: "Time (s)",
            y_desc: "Throughput (Mbps)",
        }
    }

    pub fn loss(title: &'a str) -> Self {
        Self {
            title,
            x_desc: "Time (s)",
            y_desc: "Loss count per interval",
        }
    }

    pub fn scatter() -> Self {
        Self {
            title: "Performance Scatter",
            x_desc: "Avg RTT (ms)",
            y_desc: "Avg Throughput (Mbps)",
        }
    }
}

/// Title of the throughput chart for `profile`.
pub fn throughput_title(profile: &str) -> String {
    format!("Throughput - {profile}")
}

/// Title of the loss chart for `profile`.
pub fn loss_title(profile: &str) -> String {
    format!("Loss - {profile}")
}

/// One line per scheme, showing the throughput in Mbps over time.
pub fn throughput_chart(
    path: impl AsRef<Path>,
    profile: &str,
    lines: &[(String, TimeSeries<f64>)],
) -> Result<(), RenderError> {
    let title = throughput_title(profile);
    line_chart(path, ChartLabels::throughput(&title), lines)
}

/// One line per scheme, showing the number of drops per bin over time.
pub fn loss_chart(
    path: impl AsRef<Path>,
    profile: &str,
    lines: &[(String, LossSeries)],
) -> Result<(), RenderError> {
    let title = loss_title(profile);
    line_chart(path, ChartLabels::loss(&title), &loss_as_float(lines))
}

pub(crate) fn loss_as_float(lines: &[(String, LossSeries)]) -> Vec<(String, TimeSeries<f64>)> {
    lines
        .iter()
        .map(|(name, loss)| {
            (
                name.clone(),
                loss.into_iter().map(|(t, y)| (*t, *y as f64)).collect(),
            )
        })
        .collect()
}

/// Draw a line chart with one labeled line per entry of `lines`.
pub fn line_chart(
    path: impl AsRef<Path>,
    labels: ChartLabels<'_>,
    lines: &[(String, TimeSeries<f64>)],
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let x_range = axis_range(lines.iter().flat_map(|(_, s)| s.t.iter().copied()), false);
    let y_range = axis_range(lines.iter().flat_map(|(_, s)| s.y.iter().copied()), true);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = build_chart(&root, labels, x_range, y_range)?;

    for (i, (name, series)) in lines.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                series.into_iter().map(|(t, y)| (*t, *y)),
                &color,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::info!("Wrote {path:?}");
    Ok(())
}

/// One point per summary row at (avg RTT, avg throughput), annotated with the scheme name.
pub fn scatter_chart(path: impl AsRef<Path>, rows: &[SummaryRow]) -> Result<(), RenderError> {
    let path = path.as_ref();
    let x_range = axis_range(rows.iter().map(|r| r.avg_rtt), false);
    let y_range = axis_range(rows.iter().map(|r| r.avg_throughput), false);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = build_chart(&root, ChartLabels::scatter(), x_range, y_range)?;

    chart.draw_series(rows.iter().enumerate().map(|(i, row)| {
        let color = Palette99::pick(i).mix(0.9);
        EmptyElement::at((row.avg_rtt, row.avg_throughput))
            + Circle::new((0, 0), 5, color.filled())
            + Text::new(row.protocol.clone(), (7, -15), (FONT, 15).into_font())
    }))?;

    root.present()?;
    log::info!("Wrote {path:?}");
    Ok(())
}

type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn build_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    labels: ChartLabels<'_>,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<Chart<'a, 'b>, RenderError> {
    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .draw()?;

    Ok(chart)
}

/// Range of an axis covering all finite `values`, with some padding.
///
/// If `from_zero` is set, the range includes zero. Empty or degenerate ranges are widened to a unit
/// span, so a chart can always be drawn.
pub fn axis_range(values: impl Iterator<Item = f64>, from_zero: bool) -> Range<f64> {
    let (lo, hi) = values
        .filter(|x| x.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let (lo, hi) = if from_zero {
        (lo.min(0.0), hi.max(0.0))
    } else {
        (lo, hi)
    };
    if hi - lo <= f64::EPSILON * hi.abs().max(1.0) {
        return if from_zero && lo == 0.0 {
            0.0..1.0
        } else {
            (lo - 0.5)..(hi + 0.5)
        };
    }
    let pad = (hi - lo) * PADDING;
    let lo = if from_zero && lo == 0.0 { 0.0 } else { lo - pad };
    lo..(hi + pad)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn range_of_values() {
        let range = axis_range([1.0, 3.0, 2.0].into_iter(), false);
        assert!((range.start - 0.9).abs() < 1e-9);
        assert!((range.end - 3.1).abs() < 1e-9);
    }

    #[test]
    fn range_from_zero() {
        let range = axis_range([5.0, 10.0].into_iter(), true);
        assert_eq!(range.start, 0.0);
        assert!((range.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn empty_range() {
        assert_eq!(axis_range(std::iter::empty(), false), 0.0..1.0);
        assert_eq!(axis_range([f64::NAN].into_iter(), true), 0.0..1.0);
    }

    #[test]
    fn degenerate_range() {
        assert_eq!(axis_range([2.0, 2.0].into_iter(), false), 1.5..2.5);
        assert_eq!(axis_range([0.0].into_iter(), true), 0.0..1.0);
    }

    #[test]
    fn loss_converted_to_float() {
        let loss: LossSeries = vec![(0.0, 1), (0.1, 0)].into_iter().collect();
        let lines = loss_as_float(&[("cubic".to_string(), loss)]);
        assert_eq!(lines[0].0, "cubic");
        assert_eq!(lines[0].1.y, vec![1.0, 0.0]);
        assert_eq!(lines[0].1.t, vec![0.0, 0.1]);
    }

    #[test]
    fn titles() {
        assert_eq!(throughput_title("50Mb-10ms"), "Throughput - 50Mb-10ms");
        assert_eq!(loss_title("50Mb-10ms"), "Loss - 50Mb-10ms");
    }

    #[test]
    fn throughput_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("throughput_profile1.png");
        let lines = vec![
            (
                "cubic".to_string(),
                vec![(0.0, 1.0), (0.1, 2.5), (0.2, 2.0)].into_iter().collect(),
            ),
            ("bbr".to_string(), TimeSeries::default()),
        ];
        throughput_chart(&path, "50Mb-10ms", &lines).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn loss_png_without_drops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_profile1.png");
        loss_chart(&path, "50Mb-10ms", &[("copa".to_string(), LossSeries::default())]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn scatter_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perf_scatter.png");
        let row = SummaryRow {
            protocol: "cubic".to_string(),
            profile: "50Mb-10ms".to_string(),
            avg_rtt: 40.0,
            p95_rtt: 60.0,
            avg_throughput: 45.2,
        };
        scatter_chart(&path, &[row]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn scatter_png_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perf_scatter.png");
        scatter_chart(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
