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

//! # Scenario Checks
//!
//! Checks and waits that are shared by most conformance test scenarios. They wait for the expected
//! state, watch the traffic while it is running, and validate the traffic and the routes afterwards.

use netconform::{
    check_family, routes_conserved, watch, BgpMetric, Collector, Error, ExpectedState, Family,
    FlowMetric, Snapshot, WaitForOpts,
};

use log::*;

use std::fmt;

/// Wait until every family with at least one expected entity has converged. The families are
/// waited for one after the other, each with its own timeout taken from `opts`. The condition name
/// in `opts` is replaced by the family name.
pub fn wait_converged<C>(
    collector: &C,
    expected: &ExpectedState,
    opts: &WaitForOpts,
    clear_previous: bool,
) -> Result<(), Error>
where
    C: Collector + ?Sized,
{
    for family in expected.families() {
        let opts = WaitForOpts {
            condition: format!("{} metrics to converge", family),
            interval: opts.interval,
            timeout: opts.timeout,
        };
        netconform::wait_for(
            || -> Result<bool, Error> {
                let report = check_family(family, collector, expected)?;
                report.print(clear_previous);
                Ok(report.is_converged())
            },
            &opts,
        )?;
    }
    Ok(())
}

/// Print the flow and port tables every `opts.interval` until `opts.timeout` has elapsed.
pub fn watch_flow_metrics<C>(
    collector: &C,
    opts: &WaitForOpts,
    clear_previous: bool,
) -> Result<(), Error>
where
    C: Collector + ?Sized,
{
    watch(
        || -> Result<(), Error> {
            let snapshot = Snapshot::fetch(collector, &[Family::Port, Family::Flow])?;
            snapshot.table().clear_previous(clear_previous).print();
            Ok(())
        },
        opts,
    )
}

/// A flow that did not receive every frame it sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketLoss {
    /// Name of the flow
    pub name: String,
    /// Frames sent
    pub frames_tx: u64,
    /// Frames received
    pub frames_rx: u64,
}

impl PacketLoss {
    /// Number of frames lost. Zero if more frames were received than sent.
    pub fn lost(&self) -> u64 {
        self.frames_tx.saturating_sub(self.frames_rx)
    }
}

impl fmt::Display for PacketLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: sent {} frames, received {}", self.name, self.frames_tx, self.frames_rx)
    }
}

/// Returns all flows that sent frames and received a different number of them. Flows that have not
/// sent anything are ignored.
pub fn flows_with_packet_loss(flows: &[FlowMetric]) -> Vec<PacketLoss> {
    flows
        .iter()
        .filter(|f| f.frames_tx > 0 && f.frames_tx != f.frames_rx)
        .map(|f| PacketLoss {
            name: f.name.clone(),
            frames_tx: f.frames_tx,
            frames_rx: f.frames_rx,
        })
        .collect()
}

/// Fetch all ports and flows, print them, and check that the flows received `expected_total`
/// frames in sum.
pub fn total_frames_received<C>(collector: &C, expected_total: u64) -> Result<bool, Error>
where
    C: Collector + ?Sized,
{
    let snapshot = Snapshot::fetch(collector, &[Family::Port, Family::Flow])?;
    snapshot.table().print();

    let flows = snapshot.flow.unwrap_or_default();
    for loss in flows_with_packet_loss(&flows) {
        warn!("Packet loss on flow {}", loss);
    }

    match flows.iter().try_fold(0u64, |acc, f| acc.checked_add(f.frames_rx)) {
        Some(total) if total == expected_total => Ok(true),
        Some(total) => {
            debug!("Received {} frames in total, but expected {}", total, expected_total);
            Ok(false)
        }
        None => {
            warn!("Total number of received frames does not fit into 64 bits");
            Ok(false)
        }
    }
}

/// Check route conservation on a full BGP mesh, where every peer advertises its own routes to all
/// others. Returns `false` if any peer advertises nothing.
pub fn bgp_mesh_conserved(peers: &[BgpMetric]) -> bool {
    let tx: Vec<u64> = peers.iter().map(|p| p.routes_advertised).collect();
    let rx: Vec<u64> = peers.iter().map(|p| p.routes_received).collect();
    routes_conserved(&tx, &rx)
}
