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
//! Composition of all steps for one experiment: throughput chart, loss chart, summary, scatter
//! chart. Each step writes its outputs before the next one starts.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{ExperimentConfig, LogKind},
    parser::{acklink::parse_acklink, datalink::parse_datalink, ParseError},
    records::{throughput_series, LossSeries, ThroughputSample, TimeSeries},
    render::{self, RenderError},
    summary::{summarize_with, AnalysisError, Summary},
    util::PathBufExt,
};

pub const THROUGHPUT_CHART: &str = "throughput_profile1";
pub const LOSS_CHART: &str = "loss_profile1";
pub const SCATTER_CHART: &str = "perf_scatter";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Parse Error: {0}")]
    Parse(#[from] ParseError),
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Render Error: {0}")]
    Render(#[from] RenderError),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Directory of all charts.
    pub dir: PathBuf,
    /// Also write plotly HTML versions of the charts.
    pub html: bool,
    /// Export the summary to this CSV file.
    pub csv: Option<PathBuf>,
}

impl OutputOptions {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            html: false,
            csv: None,
        }
    }

    fn png_path(&self, chart: &str) -> PathBuf {
        self.dir.as_path().then(format!("{chart}.png"))
    }

    fn html_path(&self, chart: &str) -> Option<PathBuf> {
        self.html
            .then(|| self.dir.as_path().then(format!("{chart}.html")))
    }
}

/// Run all steps and return the summary.
pub fn run(config: &ExperimentConfig, output: &OutputOptions) -> Result<Summary, PipelineError> {
    fs::create_dir_all(&output.dir)?;

    // throughput over time
    let datalinks = config
        .schemes
        .iter()
        .map(|cc| parse_datalink(config.log_path(cc, LogKind::Datalink)))
        .collect::<Result<Vec<_>, _>>()?;
    let throughput: Vec<(String, TimeSeries<f64>)> = config
        .schemes
        .iter()
        .zip(datalinks.iter())
        .map(|(cc, samples)| (cc.clone(), throughput_series(samples)))
        .collect();
    render::throughput_chart(output.png_path(THROUGHPUT_CHART), &config.profile, &throughput)?;
    if let Some(path) = output.html_path(THROUGHPUT_CHART) {
        render::html::throughput_chart(path, &config.profile, &throughput);
    }

    // drops over time
    let mut loss: Vec<(String, LossSeries)> = Vec::new();
    for cc in config.schemes.iter() {
        let series = parse_acklink(config.log_path(cc, LogKind::Acklink), config.bin_width)?;
        if series.is_empty() {
            log::warn!("No drops recorded for {cc}");
        }
        loss.push((cc.clone(), series));
    }
    render::loss_chart(output.png_path(LOSS_CHART), &config.profile, &loss)?;
    if let Some(path) = output.html_path(LOSS_CHART) {
        render::html::loss_chart(path, &config.profile, &loss);
    }

    // RTT and throughput summary
    let summary = summarize_cached(config, &datalinks)?;
    render::scatter_chart(output.png_path(SCATTER_CHART), &summary.rows)?;
    if let Some(path) = output.html_path(SCATTER_CHART) {
        render::html::scatter_chart(path, &summary.rows);
    }
    if let Some(path) = output.csv.as_ref() {
        summary.write_csv(path)?;
        log::info!("Wrote {path:?}");
    }

    Ok(summary)
}

/// Build the summary from datalink samples that were already parsed, one entry per configured
/// scheme in the configured order.
///
/// Panics if `datalinks` does not have one entry per configured scheme.
pub fn summarize_cached(
    config: &ExperimentConfig,
    datalinks: &[Vec<ThroughputSample>],
) -> Result<Summary, AnalysisError> {
    assert_eq!(config.schemes.len(), datalinks.len());
    summarize_with(config, |i, _| Ok(datalinks[i].clone()))
}
