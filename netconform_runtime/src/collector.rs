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

//! Collector, reading the telemetry from an Open Traffic Generator

use netconform::{
    BgpMetric, BgpSessionState, Collector, FlowMetric, FlowTransmitState, IsisMetric, PortMetric,
};
use otg::OtgServer;

/// # OTG Collector
///
/// Implements [`Collector`] by querying the metrics endpoint of an OTG controller. Every query is a
/// single blocking HTTP request; errors are returned as they are, without any retry.
#[derive(Debug)]
pub struct OtgCollector {
    server: OtgServer,
}

impl OtgCollector {
    /// Create a new collector from a server handle
    pub fn new(server: OtgServer) -> Self {
        Self { server }
    }

    /// Get the underlying server handle
    pub fn server(&self) -> &OtgServer {
        &self.server
    }
}

impl Collector for OtgCollector {
    type Error = otg::Error;

    fn bgpv4_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        Ok(self.server.get_bgpv4_metrics(names)?.into_iter().map(bgp_metric).collect())
    }

    fn bgpv6_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        Ok(self.server.get_bgpv6_metrics(names)?.into_iter().map(bgp_metric).collect())
    }

    fn isis_metrics(&self, names: &[String]) -> Result<Vec<IsisMetric>, Self::Error> {
        Ok(self.server.get_isis_metrics(names)?.into_iter().map(isis_metric).collect())
    }

    fn flow_metrics(&self, names: &[String]) -> Result<Vec<FlowMetric>, Self::Error> {
        Ok(self.server.get_flow_metrics(names)?.into_iter().map(flow_metric).collect())
    }

    fn port_metrics(&self, names: &[String]) -> Result<Vec<PortMetric>, Self::Error> {
        Ok(self.server.get_port_metrics(names)?.into_iter().map(port_metric).collect())
    }
}

/// A peer without a reported session state counts as down.
pub(crate) fn bgp_metric(m: otg::BgpMetric) -> BgpMetric {
    BgpMetric {
        name: m.name,
        session_state: match m.session_state {
            Some(otg::BgpSessionState::Up) => BgpSessionState::Up,
            Some(otg::BgpSessionState::Down) | None => BgpSessionState::Down,
        },
        session_flap_count: m.session_flap_count,
        routes_advertised: m.routes_advertised,
        routes_received: m.routes_received,
        route_withdraws_sent: m.route_withdraws_sent,
        route_withdraws_received: m.route_withdraws_received,
        keepalives_sent: m.keepalives_sent,
        keepalives_received: m.keepalives_received,
    }
}

pub(crate) fn isis_metric(m: otg::IsisMetric) -> IsisMetric {
    IsisMetric {
        name: m.name,
        l1_sessions_up: m.l1_sessions_up,
        l2_sessions_up: m.l2_sessions_up,
        l1_database_size: m.l1_database_size,
        l2_database_size: m.l2_database_size,
    }
}

/// A paused flow has not finished transmitting, so it is reported as started.
pub(crate) fn flow_metric(m: otg::FlowMetric) -> FlowMetric {
    FlowMetric {
        name: m.name,
        transmit: match m.transmit {
            None => FlowTransmitState::NotStarted,
            Some(otg::FlowTransmit::Started) | Some(otg::FlowTransmit::Paused) => {
                FlowTransmitState::Started
            }
            Some(otg::FlowTransmit::Stopped) => FlowTransmitState::Stopped,
        },
        frames_tx: m.frames_tx,
        frames_tx_rate: m.frames_tx_rate,
        frames_rx: m.frames_rx,
        frames_rx_rate: m.frames_rx_rate,
    }
}

pub(crate) fn port_metric(m: otg::PortMetric) -> PortMetric {
    PortMetric {
        name: m.name,
        frames_tx: m.frames_tx,
        frames_tx_rate: m.frames_tx_rate,
        frames_rx: m.frames_rx,
    }
}
