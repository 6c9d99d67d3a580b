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
//! Parsers for the three log files the testbed writes per scheme.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

pub mod acklink;
pub mod datalink;
pub mod stats;

pub use stats::StatsError;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot read {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bin width must be positive")]
    InvalidBinWidth,
    #[error("Drop events span {0} bins, more than {max}", max = acklink::MAX_BINS)]
    TooManyBins(u64),
}

/// Open `path` for buffered reading, remembering the path in case of an error.
pub(crate) fn open(path: impl AsRef<Path>) -> Result<BufReader<File>, ParseError> {
    let path = path.as_ref();
    log::trace!("Opening {path:?}");
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })
}
