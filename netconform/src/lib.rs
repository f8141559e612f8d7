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

#![deny(missing_docs, missing_debug_implementations)]

//! # NetConform: Telemetry Convergence Checks
//! This is a library for asserting that the telemetry of a network under test (BGP and IS-IS
//! sessions, route counts, frame counters) converges to an expected state within a deadline.
//!
//! ## Structure
//!
//! - **[`Metrics`](metrics)**: The records reported for every entity, grouped in
//!   [families](Family) (BGPv4, BGPv6, IS-IS, flows and ports).
//!
//! - **[`Collector`]**: The boundary to the external telemetry source. It is queried once per
//!   family and check, and must never retry by itself.
//!
//! - **[`ExpectedState`]**: For every family, the expected values of each entity. Every field is
//!   optional; fields set to `None` are not checked.
//!
//! - **[`Checker`](checker)**: Compares the records of one family against the expected state. The
//!   checker is written once, generic over a [`MetricFamily`] descriptor.
//!
//! - **[`wait_for`]**: Polls a condition at a fixed interval, until it is true, it fails, or the
//!   timeout has elapsed.
//!
//! - **[`routes_conserved`]**: Conservation law of routes in a full mesh.
//!
//! - **[`Printer`](printer)**: Tables of the fetched records, for the logs.
//!
//! ## Usage
//!
//! Build the expected state of the scenario, and pass the convergence check of each family as a
//! condition to [`wait_for`]. Both errors returned by [`wait_for`] must abort the scenario.
//!
//! ```no_run
//! use netconform::*;
//!
//! fn scenario<C: Collector>(collector: &C) -> Result<(), Error> {
//!     let mut expected = ExpectedState::new();
//!     expected.bgp4.insert("p1.bgp4.peer".to_string(), ExpectedBgpMetric::established(5, 5));
//!     expected.bgp4.insert("p2.bgp4.peer".to_string(), ExpectedBgpMetric::established(5, 5));
//!     expected.flow.insert("f1".to_string(), ExpectedFlowMetric::completed(1000));
//!
//!     wait_for(
//!         || converged::<Bgp4, _>(collector, &expected, false),
//!         &WaitForOpts::new("BGPv4 sessions to be up"),
//!     )?;
//!     wait_for(
//!         || converged::<Flow, _>(collector, &expected, false),
//!         &WaitForOpts::new("flows to complete"),
//!     )?;
//!     Ok(())
//! }
//! ```

pub mod checker;
mod collector;
mod conservation;
mod error;
pub mod expected;
pub mod family;
pub mod metrics;
pub mod printer;
mod wait;

// test modules
mod test;

pub use checker::{all_converged, check, check_all, check_family, converged, Mismatch, Report};
pub use collector::{Collector, Snapshot};
pub use conservation::routes_conserved;
pub use error::{BoxedError, Error};
pub use expected::*;
pub use family::{Bgp4, Bgp6, Flow, Isis, MetricFamily, Port};
pub use metrics::*;
pub use printer::MetricsTable;
pub use wait::{wait_for, watch, Timer, WaitForOpts, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
