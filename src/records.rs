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
//! Data types shared by the parsers, the aggregation and the renderers.

use itertools::Itertools;
use serde::Serialize;

/// A single row of a datalink log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThroughputSample {
    /// Time column of the log row.
    pub time: f64,
    /// Bytes delivered in this row.
    pub bytes: f64,
    /// `bytes * 8`
    pub bits: f64,
}

impl ThroughputSample {
    pub fn new(time: f64, bytes: f64) -> Self {
        Self {
            time,
            bytes,
            bits: bytes * 8.0,
        }
    }

    /// Throughput of this sample in Mbit.
    pub fn mbits(&self) -> f64 {
        self.bits / 1e6
    }
}

/// Parallel vectors of time and value, in the shape the plotting backends expect.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimeSeries<T> {
    pub t: Vec<f64>,
    pub y: Vec<T>,
}

impl<T> FromIterator<(f64, T)> for TimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let (t, y) = iter.into_iter().multiunzip();
        Self { t, y }
    }
}

impl<T> IntoIterator for TimeSeries<T> {
    type Item = (f64, T);

    type IntoIter = std::iter::Zip<std::vec::IntoIter<f64>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.t.into_iter().zip(self.y)
    }
}

impl<'a, T> IntoIterator for &'a TimeSeries<T> {
    type Item = (&'a f64, &'a T);

    type IntoIter = std::iter::Zip<std::slice::Iter<'a, f64>, std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.t.iter().zip(self.y.iter())
    }
}

impl<T> TimeSeries<T> {
    pub fn push(&mut self, t: f64, y: T) {
        self.t.push(t);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Number of drops per bin, keyed by the start of the bin in seconds.
pub type LossSeries = TimeSeries<u64>;

/// Throughput of a datalink log in Mbps over time.
pub fn throughput_series(samples: &[ThroughputSample]) -> TimeSeries<f64> {
    samples.iter().map(|s| (s.time, s.mbits())).collect()
}

/// RTT statistics of a single scheme, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RttStats {
    pub avg_rtt: f64,
    pub p95_rtt: f64,
}

/// One line of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub protocol: String,
    pub profile: String,
    pub avg_rtt: f64,
    #[serde(rename = "95_rtt")]
    pub p95_rtt: f64,
    /// Mean throughput in Mbps
    pub avg_throughput: f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bits_are_eight_times_bytes() {
        let sample = ThroughputSample::new(0.1, 1250.0);
        assert_eq!(sample.bits, 10_000.0);
        assert_eq!(sample.mbits(), 0.01);
    }

    #[test]
    fn time_series_from_pairs() {
        let series: TimeSeries<u64> = vec![(0.0, 1), (0.1, 0), (0.2, 3)].into_iter().collect();
        assert_eq!(series.t, vec![0.0, 0.1, 0.2]);
        assert_eq!(series.y, vec![1, 0, 3]);
        assert_eq!(series.len(), 3);
        assert_eq!((&series).into_iter().map(|(_, y)| *y).sum::<u64>(), 4);
    }

    #[test]
    fn throughput_in_mbps() {
        let samples = [
            ThroughputSample::new(0.0, 1250.0),
            ThroughputSample::new(1.0, 2500.0),
        ];
        let series = throughput_series(&samples);
        assert_eq!(series.t, vec![0.0, 1.0]);
        assert_eq!(series.y, vec![0.01, 0.02]);
    }
}
