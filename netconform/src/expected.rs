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

//! # Expected State
//!
//! The expected state describes, for every metric family, which values the entities must report
//! before the network is considered to be converged. Every field is optional: a field set to
//! `None` is not checked at all. This way, the same expected state can describe several phases of
//! a scenario, e.g., "the flow is still running" and "the flow finished with N frames".
//!
//! Entities which are not present in the expected state are not even requested from the
//! collector.
//!
//! The expected state can be loaded from JSON:
//!
//! ```
//! use netconform::{BgpSessionState, ExpectedState};
//!
//! let expected: ExpectedState = serde_json::from_str(r#"{
//!     "bgp4": { "peer1": { "session_state": "up", "routes_advertised": 5, "routes_received": 5 } },
//!     "flow": { "f1": { "transmit": "stopped", "frames_rx": 1000 } }
//! }"#).unwrap();
//!
//! assert_eq!(expected.bgp4["peer1"].session_state, Some(BgpSessionState::Up));
//! assert_eq!(expected.flow["f1"].frames_tx, None);
//! ```

use crate::checker::Comparison;
use crate::metrics::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Describes how an expected record is compared against the observed record of the same entity.
pub trait Expectation<R> {
    /// Feed every checked field into the comparison.
    fn compare(&self, observed: &R, cmp: &mut Comparison<'_>);
}

/// Expected metrics of a BGP peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedBgpMetric {
    /// Expected session state
    pub session_state: Option<BgpSessionState>,
    /// Expected number of session flaps
    pub session_flap_count: Option<u64>,
    /// Expected number of advertised routes
    pub routes_advertised: Option<u64>,
    /// Expected number of received routes
    pub routes_received: Option<u64>,
    /// Expected number of route withdraws sent
    pub route_withdraws_sent: Option<u64>,
    /// Expected number of route withdraws received
    pub route_withdraws_received: Option<u64>,
    /// Expected number of keepalives sent
    pub keepalives_sent: Option<u64>,
    /// Expected number of keepalives received
    pub keepalives_received: Option<u64>,
}

impl ExpectedBgpMetric {
    /// The session must be up, and must have advertised and received exactly the given number of
    /// routes.
    pub fn established(advertised: u64, received: u64) -> Self {
        Self {
            session_state: Some(BgpSessionState::Up),
            routes_advertised: Some(advertised),
            routes_received: Some(received),
            ..Default::default()
        }
    }
}

impl Expectation<BgpMetric> for ExpectedBgpMetric {
    fn compare(&self, observed: &BgpMetric, cmp: &mut Comparison<'_>) {
        cmp.field("session_state", &self.session_state, &observed.session_state)
            .field("session_flap_count", &self.session_flap_count, &observed.session_flap_count)
            .field("routes_advertised", &self.routes_advertised, &observed.routes_advertised)
            .field("routes_received", &self.routes_received, &observed.routes_received)
            .field(
                "route_withdraws_sent",
                &self.route_withdraws_sent,
                &observed.route_withdraws_sent,
            )
            .field(
                "route_withdraws_received",
                &self.route_withdraws_received,
                &observed.route_withdraws_received,
            )
            .field("keepalives_sent", &self.keepalives_sent, &observed.keepalives_sent)
            .field("keepalives_received", &self.keepalives_received, &observed.keepalives_received);
    }
}

/// Expected metrics of an IS-IS router.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedIsisMetric {
    /// Expected number of level 1 adjacencies that are up
    pub l1_sessions_up: Option<u64>,
    /// Expected number of level 2 adjacencies that are up
    pub l2_sessions_up: Option<u64>,
    /// Expected size of the level 1 database
    pub l1_database_size: Option<u64>,
    /// Expected size of the level 2 database
    pub l2_database_size: Option<u64>,
}

impl ExpectedIsisMetric {
    /// A single level 1 adjacency is up (and none on level 2), and the level 1 database contains
    /// `database_size` LSPs.
    pub fn level1(database_size: u64) -> Self {
        Self {
            l1_sessions_up: Some(1),
            l2_sessions_up: Some(0),
            l1_database_size: Some(database_size),
            l2_database_size: None,
        }
    }

    /// A single level 2 adjacency is up (and none on level 1), and the level 2 database contains
    /// `database_size` LSPs.
    pub fn level2(database_size: u64) -> Self {
        Self {
            l1_sessions_up: Some(0),
            l2_sessions_up: Some(1),
            l1_database_size: None,
            l2_database_size: Some(database_size),
        }
    }

    /// One adjacency on each level is up, and both databases contain `database_size` LSPs.
    pub fn level12(database_size: u64) -> Self {
        Self {
            l1_sessions_up: Some(1),
            l2_sessions_up: Some(1),
            l1_database_size: Some(database_size),
            l2_database_size: Some(database_size),
        }
    }
}

impl Expectation<IsisMetric> for ExpectedIsisMetric {
    fn compare(&self, observed: &IsisMetric, cmp: &mut Comparison<'_>) {
        cmp.field("l1_sessions_up", &self.l1_sessions_up, &observed.l1_sessions_up)
            .field("l2_sessions_up", &self.l2_sessions_up, &observed.l2_sessions_up)
            .field("l1_database_size", &self.l1_database_size, &observed.l1_database_size)
            .field("l2_database_size", &self.l2_database_size, &observed.l2_database_size);
    }
}

/// Expected metrics of a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedFlowMetric {
    /// Expected transmit state
    pub transmit: Option<FlowTransmitState>,
    /// Expected number of transmitted frames
    pub frames_tx: Option<u64>,
    /// Expected transmit rate
    pub frames_tx_rate: Option<f32>,
    /// Expected number of received frames
    pub frames_rx: Option<u64>,
    /// Expected receive rate
    pub frames_rx_rate: Option<f32>,
}

impl ExpectedFlowMetric {
    /// The flow has stopped after transmitting and receiving exactly `frames` frames.
    pub fn completed(frames: u64) -> Self {
        Self {
            transmit: Some(FlowTransmitState::Stopped),
            frames_tx: Some(frames),
            frames_tx_rate: Some(0.0),
            frames_rx: Some(frames),
            frames_rx_rate: Some(0.0),
        }
    }

    /// The flow is still transmitting. Counters are not checked.
    pub fn running() -> Self {
        Self { transmit: Some(FlowTransmitState::Started), ..Default::default() }
    }
}

impl Expectation<FlowMetric> for ExpectedFlowMetric {
    fn compare(&self, observed: &FlowMetric, cmp: &mut Comparison<'_>) {
        cmp.field("transmit", &self.transmit, &observed.transmit)
            .field("frames_tx", &self.frames_tx, &observed.frames_tx)
            .field("frames_tx_rate", &self.frames_tx_rate, &observed.frames_tx_rate)
            .field("frames_rx", &self.frames_rx, &observed.frames_rx)
            .field("frames_rx_rate", &self.frames_rx_rate, &observed.frames_rx_rate);
    }
}

/// Expected metrics of a port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedPortMetric {
    /// Expected number of transmitted frames
    pub frames_tx: Option<u64>,
    /// Expected number of received frames
    pub frames_rx: Option<u64>,
}

impl ExpectedPortMetric {
    /// The port must have received exactly `frames` frames.
    pub fn frames_rx(frames: u64) -> Self {
        Self { frames_tx: None, frames_rx: Some(frames) }
    }
}

impl Expectation<PortMetric> for ExpectedPortMetric {
    fn compare(&self, observed: &PortMetric, cmp: &mut Comparison<'_>) {
        cmp.field("frames_tx", &self.frames_tx, &observed.frames_tx)
            .field("frames_rx", &self.frames_rx, &observed.frames_rx);
    }
}

/// # Expected State
///
/// Maps, for every metric family, the entity name to the expected metrics. It is built once per
/// scenario and only read while polling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectedState {
    /// Expected BGPv4 peers
    pub bgp4: HashMap<String, ExpectedBgpMetric>,
    /// Expected BGPv6 peers
    pub bgp6: HashMap<String, ExpectedBgpMetric>,
    /// Expected IS-IS routers
    pub isis: HashMap<String, ExpectedIsisMetric>,
    /// Expected flows
    pub flow: HashMap<String, ExpectedFlowMetric>,
    /// Expected ports
    pub port: HashMap<String, ExpectedPortMetric>,
}

impl ExpectedState {
    /// Create an empty expected state, which checks nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities with an expectation in the given family.
    pub fn len(&self, family: Family) -> usize {
        match family {
            Family::Bgp4 => self.bgp4.len(),
            Family::Bgp6 => self.bgp6.len(),
            Family::Isis => self.isis.len(),
            Family::Flow => self.flow.len(),
            Family::Port => self.port.len(),
        }
    }

    /// Returns `true` if no entity of any family is expected.
    pub fn is_empty(&self) -> bool {
        Family::ALL.iter().all(|f| self.len(*f) == 0)
    }

    /// Returns all families with at least one expected entity.
    pub fn families(&self) -> Vec<Family> {
        Family::ALL.iter().copied().filter(|f| self.len(*f) > 0).collect()
    }
}
