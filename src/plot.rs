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
use std::{path::PathBuf, time::Duration};

use clap::Parser;

use cc_traces::{
    config::{self, ExperimentConfig},
    pipeline::{self, OutputOptions},
    util,
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Directory containing the `{scheme}_{kind}_run1.log` files.
    #[arg(short, long, default_value = config::DEFAULT_BASE_DIR)]
    base_dir: PathBuf,
    /// Label of the network profile, used in titles and in the summary.
    #[arg(short, long, default_value = config::DEFAULT_PROFILE)]
    profile: String,
    /// Schemes to compare, in the order they are reported.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = config::DEFAULT_SCHEMES.map(String::from)
    )]
    schemes: Vec<String>,
    /// Width of the bins used to count drops, in milliseconds.
    #[arg(long, default_value_t = config::DEFAULT_BIN_WIDTH.as_millis() as u64)]
    bin_width_ms: u64,
    /// Directory where the plots are written.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Also write interactive HTML versions of all charts.
    #[arg(long)]
    html: bool,
    /// Export the summary table to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            schemes: self.schemes.clone(),
            profile: self.profile.clone(),
            base_dir: self.base_dir.clone(),
            bin_width: Duration::from_millis(self.bin_width_ms),
        }
    }

    fn output(&self) -> OutputOptions {
        OutputOptions {
            html: self.html,
            csv: self.csv.clone(),
            ..OutputOptions::new(&self.output_dir)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    util::init_logging();

    let args = Args::parse();
    let summary = pipeline::run(&args.config(), &args.output())?;

    println!("\n{summary}");

    Ok(())
}
