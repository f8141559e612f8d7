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

//! # OTG Types
//!
//! Request and response bodies of the `monitor/metrics` endpoint. The traffic generator encodes
//! 64 bit counters either as JSON numbers or as strings; both are accepted.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of metrics to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsChoice {
    /// BGPv4 peers
    Bgpv4,
    /// BGPv6 peers
    Bgpv6,
    /// IS-IS routers
    Isis,
    /// Flows
    Flow,
    /// Ports
    Port,
}

impl MetricsChoice {
    /// Choice of the matching response
    pub fn response_choice(&self) -> &'static str {
        match self {
            Self::Bgpv4 => "bgpv4_metrics",
            Self::Bgpv6 => "bgpv6_metrics",
            Self::Isis => "isis_metrics",
            Self::Flow => "flow_metrics",
            Self::Port => "port_metrics",
        }
    }
}

impl fmt::Display for MetricsChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bgpv4 => write!(f, "bgpv4"),
            Self::Bgpv6 => write!(f, "bgpv6"),
            Self::Isis => write!(f, "isis"),
            Self::Flow => write!(f, "flow"),
            Self::Port => write!(f, "port"),
        }
    }
}

/// Selection of BGP peers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BgpMetricsRequest {
    /// Names of the peers. Empty for all peers.
    pub peer_names: Vec<String>,
}

/// Selection of IS-IS routers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IsisMetricsRequest {
    /// Names of the routers. Empty for all routers.
    pub router_names: Vec<String>,
}

/// Selection of flows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowMetricsRequest {
    /// Names of the flows. Empty for all flows.
    pub flow_names: Vec<String>,
}

/// Selection of ports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortMetricsRequest {
    /// Names of the ports. Empty for all ports.
    pub port_names: Vec<String>,
}

/// Body of a metrics request. Exactly the field named by `choice` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRequest {
    /// Kind of metrics
    pub choice: MetricsChoice,
    /// BGPv4 selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgpv4: Option<BgpMetricsRequest>,
    /// BGPv6 selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgpv6: Option<BgpMetricsRequest>,
    /// IS-IS selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isis: Option<IsisMetricsRequest>,
    /// Flow selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowMetricsRequest>,
    /// Port selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<PortMetricsRequest>,
}

impl MetricsRequest {
    fn empty(choice: MetricsChoice) -> Self {
        Self { choice, bgpv4: None, bgpv6: None, isis: None, flow: None, port: None }
    }

    /// Request the given BGPv4 peers
    pub fn bgpv4(peer_names: &[String]) -> Self {
        let peer_names = peer_names.to_vec();
        Self { bgpv4: Some(BgpMetricsRequest { peer_names }), ..Self::empty(MetricsChoice::Bgpv4) }
    }

    /// Request the given BGPv6 peers
    pub fn bgpv6(peer_names: &[String]) -> Self {
        let peer_names = peer_names.to_vec();
        Self { bgpv6: Some(BgpMetricsRequest { peer_names }), ..Self::empty(MetricsChoice::Bgpv6) }
    }

    /// Request the given IS-IS routers
    pub fn isis(router_names: &[String]) -> Self {
        let router_names = router_names.to_vec();
        Self { isis: Some(IsisMetricsRequest { router_names }), ..Self::empty(MetricsChoice::Isis) }
    }

    /// Request the given flows
    pub fn flow(flow_names: &[String]) -> Self {
        let flow_names = flow_names.to_vec();
        Self { flow: Some(FlowMetricsRequest { flow_names }), ..Self::empty(MetricsChoice::Flow) }
    }

    /// Request the given ports
    pub fn port(port_names: &[String]) -> Self {
        let port_names = port_names.to_vec();
        Self { port: Some(PortMetricsRequest { port_names }), ..Self::empty(MetricsChoice::Port) }
    }
}

/// Body of a metrics response. Only the list named by `choice` is filled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricsResponse {
    /// Kind of metrics in this response
    #[serde(default)]
    pub choice: String,
    /// BGPv4 peers
    #[serde(default)]
    pub bgpv4_metrics: Vec<BgpMetric>,
    /// BGPv6 peers
    #[serde(default)]
    pub bgpv6_metrics: Vec<BgpMetric>,
    /// IS-IS routers
    #[serde(default)]
    pub isis_metrics: Vec<IsisMetric>,
    /// Flows
    #[serde(default)]
    pub flow_metrics: Vec<FlowMetric>,
    /// Ports
    #[serde(default)]
    pub port_metrics: Vec<PortMetric>,
    /// Warnings attached by the controller
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Session state of a BGP peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BgpSessionState {
    /// Session is up
    Up,
    /// Session is down
    Down,
}

/// Metrics of a BGP peer (v4 or v6)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BgpMetric {
    /// Name of the peer
    pub name: String,
    /// Session state. Missing if the peer was never started.
    #[serde(default)]
    pub session_state: Option<BgpSessionState>,
    /// Number of session flaps
    #[serde(default, deserialize_with = "counter")]
    pub session_flap_count: u64,
    /// Advertised routes
    #[serde(default, deserialize_with = "counter")]
    pub routes_advertised: u64,
    /// Received routes
    #[serde(default, deserialize_with = "counter")]
    pub routes_received: u64,
    /// Sent route withdraws
    #[serde(default, deserialize_with = "counter")]
    pub route_withdraws_sent: u64,
    /// Received route withdraws
    #[serde(default, deserialize_with = "counter")]
    pub route_withdraws_received: u64,
    /// Sent keepalives
    #[serde(default, deserialize_with = "counter")]
    pub keepalives_sent: u64,
    /// Received keepalives
    #[serde(default, deserialize_with = "counter")]
    pub keepalives_received: u64,
}

/// Metrics of an IS-IS router
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IsisMetric {
    /// Name of the router
    pub name: String,
    /// Level 1 adjacencies that are up
    #[serde(default, deserialize_with = "counter")]
    pub l1_sessions_up: u64,
    /// Level 2 adjacencies that are up
    #[serde(default, deserialize_with = "counter")]
    pub l2_sessions_up: u64,
    /// Size of the level 1 database
    #[serde(default, deserialize_with = "counter")]
    pub l1_database_size: u64,
    /// Size of the level 2 database
    #[serde(default, deserialize_with = "counter")]
    pub l2_database_size: u64,
}

/// Transmit state of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTransmit {
    /// Transmitting
    Started,
    /// Stopped
    Stopped,
    /// Paused
    Paused,
}

/// Metrics of a flow
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlowMetric {
    /// Name of the flow
    pub name: String,
    /// Transmit state. Missing if traffic was never started.
    #[serde(default)]
    pub transmit: Option<FlowTransmit>,
    /// Transmitted frames
    #[serde(default, deserialize_with = "counter")]
    pub frames_tx: u64,
    /// Received frames
    #[serde(default, deserialize_with = "counter")]
    pub frames_rx: u64,
    /// Transmit rate
    #[serde(default)]
    pub frames_tx_rate: f32,
    /// Receive rate
    #[serde(default)]
    pub frames_rx_rate: f32,
}

/// Metrics of a port
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortMetric {
    /// Name of the port
    pub name: String,
    /// Transmitted frames
    #[serde(default, deserialize_with = "counter")]
    pub frames_tx: u64,
    /// Received frames
    #[serde(default, deserialize_with = "counter")]
    pub frames_rx: u64,
    /// Transmit rate
    #[serde(default)]
    pub frames_tx_rate: f32,
    /// Receive rate
    #[serde(default)]
    pub frames_rx_rate: f32,
}

/// Error body returned by the traffic generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct OtgErrorResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

fn counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Counter {
        Number(u64),
        Text(String),
    }

    match Counter::deserialize(deserializer)? {
        Counter::Number(n) => Ok(n),
        Counter::Text(s) => s.parse().map_err(de::Error::custom),
    }
}
