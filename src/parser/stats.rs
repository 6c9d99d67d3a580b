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
//! Extraction of the average and 95th percentile RTT from a stats log.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::records::RttStats;

use super::{open, ParseError};

lazy_static! {
    static ref AVG_RTT: Regex = Regex::new(r"avg rtt:\s*([\d\.]+)").unwrap();
    static ref P95_RTT: Regex = Regex::new(r"95th rtt:\s*([\d\.]+)").unwrap();
}

/// Reason why no RTT statistics could be extracted from a stats log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("no `avg rtt:` value found")]
    MissingAvgRtt,
    #[error("no `95th rtt:` value found")]
    MissingP95Rtt,
    #[error("`{0}` is not a valid RTT value")]
    InvalidNumber(String),
}

/// Content of a stats log together with the outcome of the RTT extraction.
#[derive(Debug, Clone)]
pub struct StatsFile {
    pub path: PathBuf,
    pub content: String,
    pub rtt: Result<RttStats, StatsError>,
}

/// Read the stats log at `path` and extract its RTT statistics. Only a missing or unreadable file
/// is an error; a file without RTT values is reported through [`StatsFile::rtt`].
pub fn parse_stats(path: impl AsRef<Path>) -> Result<StatsFile, ParseError> {
    let path = path.as_ref();
    let mut content = String::new();
    open(path)?.read_to_string(&mut content)?;
    let rtt = extract_rtt(&content);
    Ok(StatsFile {
        path: path.to_path_buf(),
        content,
        rtt,
    })
}

/// Find the first `avg rtt: <x>` and `95th rtt: <y>` anywhere in `content`.
pub fn extract_rtt(content: &str) -> Result<RttStats, StatsError> {
    let avg_rtt = capture(&AVG_RTT, content).ok_or(StatsError::MissingAvgRtt)?;
    let p95_rtt = capture(&P95_RTT, content).ok_or(StatsError::MissingP95Rtt)?;
    Ok(RttStats {
        avg_rtt: parse_value(avg_rtt)?,
        p95_rtt: parse_value(p95_rtt)?,
    })
}

fn capture<'a>(re: &Regex, content: &'a str) -> Option<&'a str> {
    re.captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn parse_value(value: &str) -> Result<f64, StatsError> {
    value
        .parse()
        .map_err(|_| StatsError::InvalidNumber(value.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    const PANTHEON_STATS: &str = "\
        Start at: Sat Mar 01 10:15:32 2025\n\
        End at: Sat Mar 01 10:16:02 2025\n\
        Below is generated by plot.py at 2025-03-01 10:16:40\n\
        # Datalink statistics\n\
        -- Total of 1 flow:\n\
        Average throughput: 47.21 Mbit/s\n\
        95th percentile per-packet one-way delay: 24.771 ms\n\
        Loss rate: 0.54%\n\
        -- Flow 1:\n\
        avg rtt: 31.42 ms\n\
        95th rtt: 48.9 ms\n";

    #[test]
    fn extracts_both_values() {
        let rtt = extract_rtt(PANTHEON_STATS).unwrap();
        assert_eq!(
            rtt,
            RttStats {
                avg_rtt: 31.42,
                p95_rtt: 48.9
            }
        );
    }

    #[test]
    fn surrounding_text_is_ignored() {
        let rtt = extract_rtt("flow 1 avg rtt:12 ms, 95th rtt:   20.5 (ms)").unwrap();
        assert_eq!(rtt.avg_rtt, 12.0);
        assert_eq!(rtt.p95_rtt, 20.5);
    }

    #[test]
    fn first_match_wins() {
        let rtt = extract_rtt("avg rtt: 1.0\n95th rtt: 2.0\navg rtt: 3.0\n95th rtt: 4.0").unwrap();
        assert_eq!(rtt.avg_rtt, 1.0);
        assert_eq!(rtt.p95_rtt, 2.0);
    }

    #[test]
    fn missing_avg() {
        assert_eq!(
            extract_rtt("95th rtt: 48.9 ms\n"),
            Err(StatsError::MissingAvgRtt)
        );
    }

    #[test]
    fn missing_p95() {
        assert_eq!(
            extract_rtt("avg rtt: 31.42 ms\n"),
            Err(StatsError::MissingP95Rtt)
        );
    }

    #[test]
    fn garbage_number() {
        assert_eq!(
            extract_rtt("avg rtt: 1.2.3\n95th rtt: 4\n"),
            Err(StatsError::InvalidNumber("1.2.3".to_string()))
        );
    }

    #[test]
    fn file_without_values_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("copa_stats_run1.log");
        std::fs::write(&path, "nothing to see here\n").unwrap();
        let stats = parse_stats(&path).unwrap();
        assert_eq!(stats.rtt, Err(StatsError::MissingAvgRtt));
        assert_eq!(stats.content, "nothing to see here\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_stats(dir.path().join("copa_stats_run1.log")).is_err());
    }
}
