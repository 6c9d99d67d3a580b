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
//! Parser for the acklink log. Every line mentioning `dropped` is a loss event, timestamped by its
//! first token. Events are counted in fixed-width bins.

use std::{io::BufRead, path::Path, time::Duration};

use crate::records::LossSeries;

use super::{open, ParseError};

const DROP_MARKER: &str = "dropped";
const NANOS_PER_SEC: f64 = 1e9;
const NANOS_PER_DAY: i64 = 86_400_000_000_000;
/// Largest number of bins a loss series may span.
pub const MAX_BINS: u64 = 10_000_000;

/// Parse the acklink log at `path` and count drops per bin of `bin_width`.
pub fn parse_acklink(
    path: impl AsRef<Path>,
    bin_width: Duration,
) -> Result<LossSeries, ParseError> {
    let path = path.as_ref();
    let loss = read_acklink(open(path)?, bin_width)?;
    log::debug!(
        "Parsed {} drops in {} bins from {path:?}",
        loss.y.iter().sum::<u64>(),
        loss.len()
    );
    Ok(loss)
}

/// Parse an acklink log from any buffered reader.
pub fn read_acklink(reader: impl BufRead, bin_width: Duration) -> Result<LossSeries, ParseError> {
    bin_events(&drop_times(reader)?, bin_width)
}

/// Timestamps (in seconds) of all lines containing the drop marker, in file order.
pub fn drop_times(reader: impl BufRead) -> Result<Vec<f64>, ParseError> {
    let mut times = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.contains(DROP_MARKER) {
            continue;
        }
        match line.split_whitespace().next().map(str::parse::<f64>) {
            Some(Ok(t)) if t.is_finite() => times.push(t),
            _ => log::warn!("Skipping drop event without a valid timestamp: {line:?}"),
        }
    }
    Ok(times)
}

/// Count `events` (seconds) per bin of `bin_width`.
///
/// Bins are half-open, `[start, start + width)`, and aligned to multiples of `bin_width` counted
/// from midnight (UTC) of the day of the earliest event. The result covers every bin from the one
/// of the earliest event up to the one of the latest event, reporting zero for bins without events.
/// Without events, the result is empty. A span of more than [`MAX_BINS`] bins is rejected.
pub fn bin_events(events: &[f64], bin_width: Duration) -> Result<LossSeries, ParseError> {
    let width = i64::try_from(bin_width.as_nanos()).map_err(|_| ParseError::InvalidBinWidth)?;
    if width == 0 {
        return Err(ParseError::InvalidBinWidth);
    }

    let nanos: Vec<i64> = events
        .iter()
        .map(|t| (t * NANOS_PER_SEC).round() as i64)
        .collect();
    let Some(earliest) = nanos.iter().min() else {
        return Ok(LossSeries::default());
    };
    let origin = earliest.div_euclid(NANOS_PER_DAY) * NANOS_PER_DAY;

    let bins: Vec<i64> = nanos.iter().map(|t| (t - origin).div_euclid(width)).collect();
    let (Some(&first), Some(&last)) = (bins.iter().min(), bins.iter().max()) else {
        return Ok(LossSeries::default());
    };
    let num_bins = (last - first) as u64 + 1;
    if num_bins > MAX_BINS {
        log::warn!("Drop events span {num_bins} bins of {bin_width:?}");
        return Err(ParseError::TooManyBins(num_bins));
    }

    let mut counts = vec![0u64; num_bins as usize];
    for bin in &bins {
        counts[(bin - first) as usize] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = origin + (first + i as i64) * width;
            (start as f64 / NANOS_PER_SEC, count)
        })
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;

    const WIDTH: Duration = Duration::from_millis(100);

    #[test]
    fn two_drops_in_adjacent_bins() {
        let log = "0.05 packet dropped\n0.12 packet dropped\n";
        let loss = read_acklink(log.as_bytes(), WIDTH).unwrap();
        assert_eq!(loss.t, vec![0.0, 0.1]);
        assert_eq!(loss.y, vec![1, 1]);
    }

    #[test]
    fn only_dropped_lines_count() {
        let log = "\
            # mahimahi mm-link\n\
            1.00 + 1500\n\
            1.01 dropped 1500\n\
            1.02 - 1500 12\n\
            1.03 dropped 1500\n";
        let loss = read_acklink(log.as_bytes(), WIDTH).unwrap();
        assert_eq!(loss.t, vec![1.0]);
        assert_eq!(loss.y, vec![2]);
    }

    #[test]
    fn gaps_are_zero_filled() {
        let events = [0.05, 0.12, 0.47, 0.48];
        let loss = bin_events(&events, WIDTH).unwrap();
        assert_eq!(loss.t, vec![0.0, 0.1, 0.2, 0.3, 0.4]);
        assert_eq!(loss.y, vec![1, 1, 0, 0, 2]);
        assert_eq!(loss.y.iter().sum::<u64>(), events.len() as u64);
    }

    #[test]
    fn unsorted_events() {
        let loss = bin_events(&[0.35, 0.01, 0.2], WIDTH).unwrap();
        assert_eq!(loss.y, vec![1, 0, 1, 1]);
        assert_eq!(loss.t[0], 0.0);
    }

    #[test]
    fn bin_boundary_belongs_to_next_bin() {
        let loss = bin_events(&[0.0, 0.1, 0.2], WIDTH).unwrap();
        assert_eq!(loss.y, vec![1, 1, 1]);
    }

    #[test]
    fn epoch_timestamps() {
        let events = [1_700_000_000.05, 1_700_000_000.25];
        let loss = bin_events(&events, WIDTH).unwrap();
        assert_eq!(loss.len(), 3);
        assert_eq!(loss.y, vec![1, 0, 1]);
        assert_eq!(loss.t[0], 1_700_000_000.0);
    }

    #[test]
    fn no_drops() {
        let log = "0.05 + 1500\n0.06 - 1500 3\n";
        let loss = read_acklink(log.as_bytes(), WIDTH).unwrap();
        assert!(loss.is_empty());
    }

    #[test]
    fn skips_invalid_timestamps() {
        let log = "dropped without time\n0.15 dropped\n";
        let loss = read_acklink(log.as_bytes(), WIDTH).unwrap();
        assert_eq!(loss.t, vec![0.1]);
        assert_eq!(loss.y, vec![1]);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            bin_events(&[0.1], Duration::ZERO),
            Err(ParseError::InvalidBinWidth)
        ));
    }

    #[test]
    fn other_widths() {
        let loss = bin_events(&[0.1, 0.3, 1.2], Duration::from_millis(500)).unwrap();
        assert_eq!(loss.t, vec![0.0, 0.5, 1.0]);
        assert_eq!(loss.y, vec![2, 0, 1]);
    }

    #[test]
    fn bins_start_at_midnight() {
        let width = Duration::from_millis(700);
        let loss = bin_events(&[86_400.05, 86_400.8], width).unwrap();
        assert_eq!(loss.t, vec![86_400.0, 86_400.7]);
        assert_eq!(loss.y, vec![1, 1]);

        let loss = bin_events(&[0.1, 1.5], width).unwrap();
        assert_eq!(loss.t, vec![0.0, 0.7, 1.4]);
        assert_eq!(loss.y, vec![1, 0, 1]);
    }

    #[test]
    fn stray_timestamp_is_rejected() {
        let log = "0 dropped\n1700000000.05 dropped\n";
        assert!(matches!(
            read_acklink(log.as_bytes(), WIDTH),
            Err(ParseError::TooManyBins(n)) if n > MAX_BINS
        ));
    }
}
