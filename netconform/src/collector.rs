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

//! # Telemetry Collector
//!
//! The collector is the boundary to the external telemetry source (usually the traffic generator).
//! This crate only consumes the records it returns. See `netconform_runtime` for an
//! implementation talking to an Open Traffic Generator.

use crate::metrics::*;
use crate::printer::MetricsTable;
use crate::Error;

/// # Telemetry Collector
///
/// One query per metric family. Every query returns only the entities whose name is contained in
/// `names`. If `names` is empty, all known entities of that family are returned.
///
/// An error must be returned if the telemetry source cannot be reached, or if the query is
/// malformed. The collector must not retry on its own; retrying is the job of
/// [`wait_for`](crate::wait_for), which treats every collector error as fatal.
///
/// The checker is stateless, so calling it from several threads with different expected states is
/// fine, *as long as the collector itself is thread-safe*. This crate does not require it.
pub trait Collector {
    /// Error returned when the telemetry cannot be fetched
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the metrics of BGPv4 peers
    fn bgpv4_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error>;

    /// Fetch the metrics of BGPv6 peers
    fn bgpv6_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error>;

    /// Fetch the metrics of IS-IS routers
    fn isis_metrics(&self, names: &[String]) -> Result<Vec<IsisMetric>, Self::Error>;

    /// Fetch the metrics of flows
    fn flow_metrics(&self, names: &[String]) -> Result<Vec<FlowMetric>, Self::Error>;

    /// Fetch the metrics of ports
    fn port_metrics(&self, names: &[String]) -> Result<Vec<PortMetric>, Self::Error>;
}

impl<C: Collector + ?Sized> Collector for &C {
    type Error = C::Error;

    fn bgpv4_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        (**self).bgpv4_metrics(names)
    }

    fn bgpv6_metrics(&self, names: &[String]) -> Result<Vec<BgpMetric>, Self::Error> {
        (**self).bgpv6_metrics(names)
    }

    fn isis_metrics(&self, names: &[String]) -> Result<Vec<IsisMetric>, Self::Error> {
        (**self).isis_metrics(names)
    }

    fn flow_metrics(&self, names: &[String]) -> Result<Vec<FlowMetric>, Self::Error> {
        (**self).flow_metrics(names)
    }

    fn port_metrics(&self, names: &[String]) -> Result<Vec<PortMetric>, Self::Error> {
        (**self).port_metrics(names)
    }
}

/// # Snapshot
///
/// All records of a set of families, fetched at (roughly) the same time. Families that were not
/// requested are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// BGPv4 peers
    pub bgpv4: Option<Vec<BgpMetric>>,
    /// BGPv6 peers
    pub bgpv6: Option<Vec<BgpMetric>>,
    /// IS-IS routers
    pub isis: Option<Vec<IsisMetric>>,
    /// Flows
    pub flow: Option<Vec<FlowMetric>>,
    /// Ports
    pub port: Option<Vec<PortMetric>>,
}

impl Snapshot {
    /// Fetch all entities of the given families. The first collector error aborts the snapshot.
    pub fn fetch<C: Collector + ?Sized>(collector: &C, families: &[Family]) -> Result<Self, Error> {
        let mut snapshot = Self::default();
        for family in families {
            match family {
                Family::Bgp4 => {
                    snapshot.bgpv4 =
                        Some(collector.bgpv4_metrics(&[]).map_err(|e| Error::collector(*family, e))?)
                }
                Family::Bgp6 => {
                    snapshot.bgpv6 =
                        Some(collector.bgpv6_metrics(&[]).map_err(|e| Error::collector(*family, e))?)
                }
                Family::Isis => {
                    snapshot.isis =
                        Some(collector.isis_metrics(&[]).map_err(|e| Error::collector(*family, e))?)
                }
                Family::Flow => {
                    snapshot.flow =
                        Some(collector.flow_metrics(&[]).map_err(|e| Error::collector(*family, e))?)
                }
                Family::Port => {
                    snapshot.port =
                        Some(collector.port_metrics(&[]).map_err(|e| Error::collector(*family, e))?)
                }
            }
        }
        Ok(snapshot)
    }

    /// Prepare the table of all fetched families.
    pub fn table(&self) -> MetricsTable<'_> {
        let mut table = MetricsTable::new();
        if let Some(m) = self.bgpv4.as_ref() {
            table = table.bgpv4(m);
        }
        if let Some(m) = self.bgpv6.as_ref() {
            table = table.bgpv6(m);
        }
        if let Some(m) = self.isis.as_ref() {
            table = table.isis(m);
        }
        if let Some(m) = self.flow.as_ref() {
            table = table.flow(m);
        }
        if let Some(m) = self.port.as_ref() {
            table = table.port(m);
        }
        table
    }
}
