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
//! Joins the RTT statistics and the mean throughput of every scheme into the summary table.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::{
    config::{ExperimentConfig, LogKind},
    parser::{datalink::parse_datalink, stats::parse_stats, ParseError, StatsError},
    records::{SummaryRow, ThroughputSample},
};

const HEADER: &str = "--- RTT & Throughput Summary ---";
const COLUMNS: [&str; 5] = ["protocol", "profile", "avg_rtt", "95_rtt", "avg_throughput"];
/// Maximum number of decimals shown in the table.
const MAX_DECIMALS: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Parse Error: {0}")]
    Parse(#[from] ParseError),
    #[error("No valid throughput samples for {scheme} in {path:?}")]
    NoThroughputSamples { scheme: String, path: PathBuf },
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary rows of all schemes that could be analyzed, plus the schemes that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Rows in the configured scheme order.
    pub rows: Vec<SummaryRow>,
    /// Schemes whose stats log did not contain the RTT values, with the reason.
    pub skipped: Vec<(String, StatsError)>,
}

/// Mean throughput of `samples` in Mbps, or `None` without samples.
pub fn mean_throughput_mbps(samples: &[ThroughputSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.bits).sum();
    Some(total / samples.len() as f64 / 1e6)
}

/// Build the summary for all configured schemes, reading both the stats and the datalink logs from
/// the configured directory.
pub fn summarize(config: &ExperimentConfig) -> Result<Summary, AnalysisError> {
    summarize_with(config, |_, scheme| {
        parse_datalink(config.log_path(scheme, LogKind::Datalink))
    })
}

/// Build the summary for all configured schemes, obtaining the throughput samples of a scheme
/// from `datalink`, which receives the position of the scheme in the configuration and its name.
/// It is only called for schemes with valid RTT statistics.
///
/// A scheme without RTT values in its stats log is skipped and logged. A missing stats log, a
/// failing `datalink`, or a datalink log without any valid row aborts the whole summary.
pub fn summarize_with<F>(
    config: &ExperimentConfig,
    mut datalink: F,
) -> Result<Summary, AnalysisError>
where
    F: FnMut(usize, &str) -> Result<Vec<ThroughputSample>, ParseError>,
{
    let mut summary = Summary::default();

    for (i, scheme) in config.schemes.iter().enumerate() {
        let stats = parse_stats(config.log_path(scheme, LogKind::Stats))?;
        let rtt = match stats.rtt {
            Ok(rtt) => rtt,
            Err(reason) => {
                log::error!("Could not find RTT values in {:?}: {reason}", stats.path);
                log::error!("File content:\n{}", stats.content);
                summary.skipped.push((scheme.clone(), reason));
                continue;
            }
        };

        let samples = datalink(i, scheme.as_str())?;
        let avg_throughput =
            mean_throughput_mbps(&samples).ok_or_else(|| AnalysisError::NoThroughputSamples {
                scheme: scheme.clone(),
                path: config.log_path(scheme, LogKind::Datalink),
            })?;

        log::debug!(
            "{scheme}: avg rtt {} ms, 95th rtt {} ms, {avg_throughput:.3} Mbps",
            rtt.avg_rtt,
            rtt.p95_rtt
        );
        summary.rows.push(SummaryRow {
            protocol: scheme.clone(),
            profile: config.profile.clone(),
            avg_rtt: rtt.avg_rtt,
            p95_rtt: rtt.p95_rtt,
            avg_throughput,
        });
    }

    Ok(summary)
}

impl Summary {
    /// Write all rows to a CSV file with a header line.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;
        for row in self.rows.iter() {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Cells of the table, column by column.
    fn columns(&self) -> [Vec<String>; 5] {
        [
            self.rows.iter().map(|r| r.protocol.clone()).collect(),
            self.rows.iter().map(|r| r.profile.clone()).collect(),
            format_floats(self.rows.iter().map(|r| r.avg_rtt)),
            format_floats(self.rows.iter().map(|r| r.p95_rtt)),
            format_floats(self.rows.iter().map(|r| r.avg_throughput)),
        ]
    }
}

/// Format a column of floats with a common number of decimals, the smallest that represents every
/// value exactly (at most [`MAX_DECIMALS`]).
fn format_floats(values: impl Iterator<Item = f64>) -> Vec<String> {
    let values = values.collect_vec();
    let decimals = values
        .iter()
        .map(|x| {
            let repr = x.to_string();
            repr.split_once('.').map(|(_, d)| d.len()).unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
        .clamp(1, MAX_DECIMALS);
    values
        .into_iter()
        .map(|x| format!("{x:.decimals$}"))
        .collect()
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;

        let columns = self.columns();
        let widths = COLUMNS
            .iter()
            .zip(columns.iter())
            .map(|(name, cells)| {
                cells
                    .iter()
                    .map(|c| c.len())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect_vec();

        let header = COLUMNS
            .iter()
            .zip(widths.iter())
            .map(|(name, &w)| format!("{name:>w$}"))
            .join("  ");
        write!(f, "{header}")?;

        for i in 0..self.rows.len() {
            let line = columns
                .iter()
                .zip(widths.iter())
                .map(|(cells, &w)| format!("{:>w$}", cells[i]))
                .join("  ");
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}
