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

//! In-memory collector, returning fixed records and recording every query.

use crate::metrics::*;
use crate::Collector;

use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("telemetry channel unreachable")]
pub(crate) struct Unreachable;

#[derive(Debug, Default)]
pub(crate) struct StaticCollector {
    pub bgpv4: Vec<BgpMetric>,
    pub bgpv6: Vec<BgpMetric>,
    pub isis: Vec<IsisMetric>,
    pub flow: Vec<FlowMetric>,
    pub port: Vec<PortMetric>,
    pub unreachable: bool,
    pub queries: RefCell<Vec<(Family, Vec<String>)>>,
}

impl StaticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Default::default() }
    }

    pub fn num_queries(&self) -> usize {
        self.queries.borrow().len()
    }

    fn serve<R: Metric + Clone>(
        &self,
        family: Family,
        names: &[String],
        records: &[R],
    ) -> Result<Vec<R>, Unreachable> {
        self.queries.borrow_mut().push((family, names.to_vec()));
        if self.unreachable {
            return Err(Unreachable);
        }
        Ok(records
            .iter()
            .filter(|r| names.is_empty() || names.iter().any(|n| n == r.name()))
            .cloned()
            .collect())
    }
}

impl Collector for StaticCollector {
    type Error = Unreachable;

    fn bgpv4_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        self.serve(Family::Bgp4, names, &self.bgpv4)
    }

    fn bgpv6_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        self.serve(Family::Bgp6, names, &self.bgpv6)
    }

    fn isis_metrics(&self, names: &[String]) -> Result<Vec<IsisMetric>, Self::Error> {
        self.serve(Family::Isis, names, &self.isis)
    }

    fn flow_metrics(&self, names: &[String]) -> Result<Vec<FlowMetric>, Self::Error> {
        self.serve(Family::Flow, names, &self.flow)
    }

    fn port_metrics(&self, names: &[String]) -> Result<Vec<PortMetric>, Self::Error> {
        self.serve(Family::Port, names, &self.port)
    }
}

pub(crate) fn bgp(name: &str, state: BgpSessionState, advertised: u64, received: u64) -> BgpMetric {
    BgpMetric {
        name: name.to_string(),
        session_state: state,
        routes_advertised: advertised,
        routes_received: received,
        ..Default::default()
    }
}

pub(crate) fn flow(name: &str, transmit: FlowTransmitState, tx: u64, rx: u64) -> FlowMetric {
    FlowMetric {
        name: name.to_string(),
        transmit,
        frames_tx: tx,
        frames_rx: rx,
        ..Default::default()
    }
}
