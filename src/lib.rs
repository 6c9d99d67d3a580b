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
//! Library for parsing and plotting congestion-control emulation traces (throughput, loss and
//! RTT) of a set of schemes under a single network profile.

pub mod config;
pub mod parser;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod summary;
pub mod util;

pub mod prelude {
    pub use super::{
        config::{ExperimentConfig, LogKind},
        parser::{
            acklink::parse_acklink, datalink::parse_datalink, stats::parse_stats, ParseError,
            StatsError,
        },
        pipeline::{run, OutputOptions, PipelineError},
        records::{LossSeries, RttStats, SummaryRow, ThroughputSample, TimeSeries},
        summary::{summarize, AnalysisError, Summary},
    };
}
