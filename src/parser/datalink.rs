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
//! Parser for the datalink log, a whitespace separated table with the time in the first and the
//! number of delivered bytes in the fourth column.

use std::{io::BufRead, path::Path};

use crate::records::ThroughputSample;

use super::{open, ParseError};

const TIME_COLUMN: usize = 0;
const BYTES_COLUMN: usize = 3;

/// Parse the datalink log at `path`.
///
/// Rows whose time or byte count is not numeric (or missing) are dropped. A missing file is an
/// error.
pub fn parse_datalink(path: impl AsRef<Path>) -> Result<Vec<ThroughputSample>, ParseError> {
    let path = path.as_ref();
    let samples = read_datalink(open(path)?)?;
    log::debug!("Parsed {} throughput samples from {path:?}", samples.len());
    Ok(samples)
}

/// Parse a datalink log from any buffered reader.
pub fn read_datalink(reader: impl BufRead) -> Result<Vec<ThroughputSample>, ParseError> {
    let mut samples = Vec::new();
    let mut dropped = 0usize;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(&line) {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::trace!("Dropped {dropped} malformed datalink rows");
    }
    Ok(samples)
}

fn parse_row(line: &str) -> Option<ThroughputSample> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    let time = parse_number(columns.get(TIME_COLUMN)?)?;
    let bytes = parse_number(columns.get(BYTES_COLUMN)?)?;
    Some(ThroughputSample::new(time, bytes))
}

fn parse_number(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|x| !x.is_nan())
}
