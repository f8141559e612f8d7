// NetConform: Telemetry Convergence Checks for Network Conformance Tests
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use netconform::{watch, ExpectedState, Family, Snapshot, WaitForOpts};
use netconform_runtime::{wait_converged, OtgCollector};
use otg::{OtgOptions, OtgServer};

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    // run clap
    let args = CommandLineArguments::parse();

    // initialize the env logger
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    let options = OtgOptions {
        verify_tls: !args.insecure,
        timeout: Duration::from_secs(args.request_timeout),
    };
    let collector = OtgCollector::new(OtgServer::new(&args.location, options)?);

    match args.cmd {
        MainCommand::Show { families } => {
            let snapshot = Snapshot::fetch(&collector, &selected(families))?;
            snapshot.table().print();
        }
        MainCommand::Watch { families, interval, duration, clear } => {
            let families = selected(families);
            let opts = WaitForOpts::new("the metrics")
                .interval(Duration::from_millis(interval))
                .timeout(Duration::from_secs(duration));
            watch(
                || -> Result<(), netconform::Error> {
                    let snapshot = Snapshot::fetch(&collector, &families)?;
                    snapshot.table().clear_previous(clear).print();
                    Ok(())
                },
                &opts,
            )?;
        }
        MainCommand::Wait { expected, interval, timeout, clear } => {
            let expected: ExpectedState = serde_json::from_str(&fs::read_to_string(&expected)?)?;
            if expected.is_empty() {
                warn!("The expected state is empty, nothing to wait for!");
            }
            let opts = WaitForOpts::default()
                .interval(Duration::from_millis(interval))
                .timeout(Duration::from_secs(timeout));
            wait_converged(&collector, &expected, &opts, clear)?;
            info!("All {} expected entities have converged", expected_len(&expected));
        }
    }

    Ok(())
}

/// Use all families if none are given
fn selected(families: Vec<Family>) -> Vec<Family> {
    if families.is_empty() {
        Family::ALL.to_vec()
    } else {
        families
    }
}

fn expected_len(expected: &ExpectedState) -> usize {
    Family::ALL.iter().map(|f| expected.len(*f)).sum()
}

/// Observe the telemetry of an Open Traffic Generator, and wait until it matches the expected state
/// of a conformance test.
#[derive(Parser, Debug)]
#[clap(name = "NetConform", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Location of the OTG controller
    #[clap(short, long, default_value = "https://localhost:8443")]
    location: String,
    /// Accept invalid TLS certificates of the controller
    #[clap(short = 'k', long)]
    insecure: bool,
    /// Timeout of a single request to the controller, in seconds
    #[clap(long, default_value = "10")]
    request_timeout: u64,
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Print the current metrics once
    #[clap(name = "show")]
    Show {
        /// Families to print (bgp4, bgp6, isis, port, flow). All of them if omitted.
        families: Vec<Family>,
    },
    /// Print the metrics repeatedly, until the duration has elapsed
    #[clap(name = "watch")]
    Watch {
        /// Families to print (bgp4, bgp6, isis, port, flow). All of them if omitted.
        families: Vec<Family>,
        /// Time between two updates, in milliseconds
        #[clap(short, long, default_value = "1000")]
        interval: u64,
        /// Total time to watch, in seconds
        #[clap(short, long, default_value = "30")]
        duration: u64,
        /// Clear the terminal before every update
        #[clap(short, long)]
        clear: bool,
    },
    /// Wait until the metrics match the expected state, stored as JSON
    #[clap(name = "wait")]
    Wait {
        /// JSON file containing the expected state
        expected: PathBuf,
        /// Time between two checks, in milliseconds
        #[clap(short, long, default_value = "500")]
        interval: u64,
        /// Timeout for each family, in seconds
        #[clap(short, long, default_value = "30")]
        timeout: u64,
        /// Clear the terminal before printing the tables
        #[clap(short, long)]
        clear: bool,
    },
}
