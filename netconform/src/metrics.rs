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

//! # Metric Records
//!
//! Typed snapshots of the telemetry reported for a single entity (a BGP peer, an IS-IS router, a
//! flow or a port). Records are produced fresh by a [`Collector`](crate::Collector) on every
//! query, and are never kept across two convergence checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric family, used to group the records and the expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// BGP sessions over IPv4
    Bgp4,
    /// BGP sessions over IPv6
    Bgp6,
    /// IS-IS routers
    Isis,
    /// Traffic flows
    Flow,
    /// Test ports
    Port,
}

impl Family {
    /// All families, in the order they are checked and printed.
    pub const ALL: [Family; 5] =
        [Family::Bgp4, Family::Bgp6, Family::Isis, Family::Port, Family::Flow];
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Bgp4 => write!(f, "Bgpv4"),
            Family::Bgp6 => write!(f, "Bgpv6"),
            Family::Isis => write!(f, "Isis"),
            Family::Flow => write!(f, "Flow"),
            Family::Port => write!(f, "Port"),
        }
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bgp4" | "bgpv4" => Ok(Family::Bgp4),
            "bgp6" | "bgpv6" => Ok(Family::Bgp6),
            "isis" => Ok(Family::Isis),
            "flow" | "flows" => Ok(Family::Flow),
            "port" | "ports" => Ok(Family::Port),
            _ => Err(format!("Unknown metric family: {}", s)),
        }
    }
}

/// Common interface of all metric records
pub trait Metric {
    /// Name of the entity. Names are unique within one snapshot of a family.
    fn name(&self) -> &str;
}

/// State of a BGP session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BgpSessionState {
    /// Session is down
    Down,
    /// Session is established
    Up,
}

impl Default for BgpSessionState {
    fn default() -> Self {
        Self::Down
    }
}

impl fmt::Display for BgpSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
        }
    }
}

/// Transmit state of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTransmitState {
    /// Traffic was never started for this flow
    NotStarted,
    /// The flow is transmitting
    Started,
    /// The flow has stopped transmitting
    Stopped,
}

impl Default for FlowTransmitState {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for FlowTransmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Metrics of a BGP peer (both for IPv4 and IPv6 sessions)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BgpMetric {
    /// Name of the peer
    pub name: String,
    /// Session state
    pub session_state: BgpSessionState,
    /// Number of times the session went from up to down
    pub session_flap_count: u64,
    /// Number of routes advertised to the peer
    pub routes_advertised: u64,
    /// Number of routes received from the peer
    pub routes_received: u64,
    /// Number of route withdraws sent
    pub route_withdraws_sent: u64,
    /// Number of route withdraws received
    pub route_withdraws_received: u64,
    /// Number of keepalives sent
    pub keepalives_sent: u64,
    /// Number of keepalives received
    pub keepalives_received: u64,
}

/// Metrics of an IS-IS router
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IsisMetric {
    /// Name of the router
    pub name: String,
    /// Number of level 1 adjacencies that are up
    pub l1_sessions_up: u64,
    /// Number of level 2 adjacencies that are up
    pub l2_sessions_up: u64,
    /// Number of LSPs in the level 1 database
    pub l1_database_size: u64,
    /// Number of LSPs in the level 2 database
    pub l2_database_size: u64,
}

/// Metrics of a traffic flow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowMetric {
    /// Name of the flow
    pub name: String,
    /// Transmit state
    pub transmit: FlowTransmitState,
    /// Frames transmitted
    pub frames_tx: u64,
    /// Current transmit rate, in frames per second
    pub frames_tx_rate: f32,
    /// Frames received
    pub frames_rx: u64,
    /// Current receive rate, in frames per second
    pub frames_rx_rate: f32,
}

/// Metrics of a test port
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortMetric {
    /// Name of the port
    pub name: String,
    /// Frames transmitted
    pub frames_tx: u64,
    /// Current transmit rate, in frames per second
    pub frames_tx_rate: f32,
    /// Frames received
    pub frames_rx: u64,
}

impl Metric for BgpMetric {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Metric for IsisMetric {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Metric for FlowMetric {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Metric for PortMetric {
    fn name(&self) -> &str {
        &self.name
    }
}
