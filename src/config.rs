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
//! Describes which traces to load and where to find them.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::util::PathBufExt;

/// Schemes that are compared when nothing else is configured.
pub const DEFAULT_SCHEMES: [&str; 3] = ["cubic", "bbr", "copa"];
/// Network profile label used in the chart titles and the summary.
pub const DEFAULT_PROFILE: &str = "50Mb-10ms";
/// Directory holding the testbed logs.
pub const DEFAULT_BASE_DIR: &str = "/home/ramya/pantheon_logs";
/// Width of a loss bin.
pub const DEFAULT_BIN_WIDTH: Duration = Duration::from_millis(100);

/// Kind of log file produced by the testbed for each scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum LogKind {
    /// Bytes delivered on the emulated data path.
    #[strum(serialize = "mm_datalink")]
    Datalink,
    /// Events on the acknowledgment path, including drops.
    #[strum(serialize = "mm_acklink")]
    Acklink,
    /// Precomputed RTT statistics.
    #[strum(serialize = "stats")]
    Stats,
}

/// Everything that determines a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Schemes in the order in which they are reported.
    pub schemes: Vec<String>,
    /// Label of the network profile.
    pub profile: String,
    /// Directory containing the `{scheme}_{kind}_run1.log` files.
    pub base_dir: PathBuf,
    /// Width of the intervals used to count drops.
    pub bin_width: Duration,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            schemes: DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect(),
            profile: DEFAULT_PROFILE.to_string(),
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            bin_width: DEFAULT_BIN_WIDTH,
        }
    }
}

impl ExperimentConfig {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Path of the log of the given `kind` for `scheme`, e.g.
    /// `{base_dir}/cubic_mm_datalink_run1.log`.
    pub fn log_path(&self, scheme: impl AsRef<str>, kind: LogKind) -> PathBuf {
        self.base_dir.as_path().then(log_file_name(scheme, kind))
    }
}

/// File name of a log, independent of the directory it lives in.
pub fn log_file_name(scheme: impl AsRef<str>, kind: LogKind) -> String {
    format!("{}_{kind}_run1.log", scheme.as_ref())
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.schemes, vec!["cubic", "bbr", "copa"]);
        assert_eq!(config.profile, "50Mb-10ms");
        assert_eq!(config.bin_width, Duration::from_millis(100));
    }

    #[test]
    fn file_names() {
        assert_eq!(
            log_file_name("cubic", LogKind::Datalink),
            "cubic_mm_datalink_run1.log"
        );
        assert_eq!(
            log_file_name("bbr", LogKind::Acklink),
            "bbr_mm_acklink_run1.log"
        );
        assert_eq!(log_file_name("copa", LogKind::Stats), "copa_stats_run1.log");
    }

    #[test]
    fn paths_below_base_dir() {
        let config = ExperimentConfig::new("/tmp/logs");
        for kind in LogKind::iter() {
            let path = config.log_path("cubic", kind);
            assert_eq!(path.parent(), Some(Path::new("/tmp/logs")));
        }
        assert_eq!(
            config.log_path("copa", LogKind::Stats),
            PathBuf::from("/tmp/logs/copa_stats_run1.log")
        );
    }
}
