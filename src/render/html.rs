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
//! Interactive plotly versions of the charts, written as standalone HTML files.

use std::path::Path;

use plotly::{
    common::{Marker, Mode, Position},
    layout::{Axis, HoverMode},
    Layout, Plot, Scatter,
};

use crate::records::{LossSeries, SummaryRow, TimeSeries};

use super::{loss_as_float, loss_title, throughput_title, ChartLabels};

/// Interactive version of [`super::throughput_chart`].
pub fn throughput_chart(
    path: impl AsRef<Path>,
    profile: &str,
    lines: &[(String, TimeSeries<f64>)],
) {
    let title = throughput_title(profile);
    line_chart(path, ChartLabels::throughput(&title), lines)
}

/// Interactive version of [`super::loss_chart`].
pub fn loss_chart(path: impl AsRef<Path>, profile: &str, lines: &[(String, LossSeries)]) {
    let title = loss_title(profile);
    line_chart(path, ChartLabels::loss(&title), &loss_as_float(lines))
}

/// Generate the plot of a line chart without writing it.
pub fn line_plot(labels: ChartLabels<'_>, lines: &[(String, TimeSeries<f64>)]) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(layout(labels).hover_mode(HoverMode::X));
    for (name, series) in lines {
        let trace = Scatter::new(series.t.clone(), series.y.clone())
            .name(name.as_str())
            .mode(Mode::Lines);
        plot.add_trace(trace);
    }
    plot
}

/// Write a line chart with one trace per entry of `lines`.
pub fn line_chart(
    path: impl AsRef<Path>,
    labels: ChartLabels<'_>,
    lines: &[(String, TimeSeries<f64>)],
) {
    let path = path.as_ref();
    line_plot(labels, lines).write_html(path);
    log::info!("Wrote {path:?}");
}

/// Generate the RTT-vs-throughput plot without writing it. Each scheme is its own trace, labeled
/// with the scheme name.
pub fn scatter_plot(rows: &[SummaryRow]) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(layout(ChartLabels::scatter()));
    for row in rows {
        let trace = Scatter::new(vec![row.avg_rtt], vec![row.avg_throughput])
            .name(row.protocol.as_str())
            .mode(Mode::MarkersText)
            .text_array(vec![row.protocol.clone()])
            .text_position(Position::TopRight)
            .marker(Marker::new().size(10));
        plot.add_trace(trace);
    }
    plot
}

/// Interactive version of [`super::scatter_chart`].
pub fn scatter_chart(path: impl AsRef<Path>, rows: &[SummaryRow]) {
    let path = path.as_ref();
    scatter_plot(rows).write_html(path);
    log::info!("Wrote {path:?}");
}

fn layout(labels: ChartLabels<'_>) -> Layout {
    Layout::new()
        .title(labels.title.to_string())
        .x_axis(Axis::new().title(labels.x_desc.to_string()))
        .y_axis(Axis::new().title(labels.y_desc.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn rows() -> Vec<SummaryRow> {
        ["cubic", "bbr"]
            .into_iter()
            .enumerate()
            .map(|(i, cc)| SummaryRow {
                protocol: cc.to_string(),
                profile: "50Mb-10ms".to_string(),
                avg_rtt: 10.0 * (i + 1) as f64,
                p95_rtt: 20.0 * (i + 1) as f64,
                avg_throughput: 40.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn scatter_has_one_trace_per_row() {
        let plot = scatter_plot(&rows());
        let json = plot.to_json();
        assert!(json.contains("\"cubic\""));
        assert!(json.contains("\"bbr\""));
        assert!(json.contains("Performance Scatter"));
        assert!(json.contains("Avg RTT (ms)"));
    }

    #[test]
    fn line_plot_contains_all_schemes() {
        let title = throughput_title("50Mb-10ms");
        let lines = vec![
            (
                "cubic".to_string(),
                vec![(0.0, 1.0), (1.0, 2.0)].into_iter().collect(),
            ),
            ("copa".to_string(), TimeSeries::default()),
        ];
        let json = line_plot(ChartLabels::throughput(&title), &lines).to_json();
        assert!(json.contains("Throughput - 50Mb-10ms"));
        assert!(json.contains("\"cubic\""));
        assert!(json.contains("\"copa\""));
        assert!(json.contains("Throughput (Mbps)"));
    }

    #[test]
    fn writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss_profile1.html");
        let loss: LossSeries = vec![(0.0, 1), (0.1, 1)].into_iter().collect();
        loss_chart(&path, "50Mb-10ms", &[("bbr".to_string(), loss)]);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Loss - 50Mb-10ms"));
    }
}
