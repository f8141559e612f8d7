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

//! # Family Descriptors
//!
//! A metric family ties together the record type, the expected record type, the slot in the
//! [`ExpectedState`], the collector query and the printed table. The checker is written once,
//! generic over [`MetricFamily`], instead of once per family.

use crate::collector::Collector;
use crate::expected::*;
use crate::metrics::*;
use crate::printer::MetricsTable;

use std::collections::HashMap;

/// Descriptor of a metric family
pub trait MetricFamily {
    /// The family tag
    const FAMILY: Family;

    /// Records returned by the collector
    type Record: Metric;

    /// Expectations for a single record
    type Expected: Expectation<Self::Record>;

    /// Get the expectations of this family
    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected>;

    /// Fetch the records of the given entities
    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error>;

    /// Prepare the table of the given records
    fn table(records: &[Self::Record]) -> MetricsTable<'_>;
}

/// BGP peers over IPv4
#[derive(Debug, Clone, Copy)]
pub struct Bgp4;

/// BGP peers over IPv6
#[derive(Debug, Clone, Copy)]
pub struct Bgp6;

/// IS-IS routers
#[derive(Debug, Clone, Copy)]
pub struct Isis;

/// Traffic flows
#[derive(Debug, Clone, Copy)]
pub struct Flow;

/// Test ports
#[derive(Debug, Clone, Copy)]
pub struct Port;

impl MetricFamily for Bgp4 {
    const FAMILY: Family = Family::Bgp4;
    type Record = BgpMetric;
    type Expected = ExpectedBgpMetric;

    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected> {
        &state.bgp4
    }

    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error> {
        collector.bgpv4_metrics(names)
    }

    fn table(records: &[Self::Record]) -> MetricsTable<'_> {
        MetricsTable::new().bgpv4(records)
    }
}

impl MetricFamily for Bgp6 {
    const FAMILY: Family = Family::Bgp6;
    type Record = BgpMetric;
    type Expected = ExpectedBgpMetric;

    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected> {
        &state.bgp6
    }

    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error> {
        collector.bgpv6_metrics(names)
    }

    fn table(records: &[Self::Record]) -> MetricsTable<'_> {
        MetricsTable::new().bgpv6(records)
    }
}

impl MetricFamily for Isis {
    const FAMILY: Family = Family::Isis;
    type Record = IsisMetric;
    type Expected = ExpectedIsisMetric;

    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected> {
        &state.isis
    }

    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error> {
        collector.isis_metrics(names)
    }

    fn table(records: &[Self::Record]) -> MetricsTable<'_> {
        MetricsTable::new().isis(records)
    }
}

impl MetricFamily for Flow {
    const FAMILY: Family = Family::Flow;
    type Record = FlowMetric;
    type Expected = ExpectedFlowMetric;

    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected> {
        &state.flow
    }

    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error> {
        collector.flow_metrics(names)
    }

    fn table(records: &[Self::Record]) -> MetricsTable<'_> {
        MetricsTable::new().flow(records)
    }
}

impl MetricFamily for Port {
    const FAMILY: Family = Family::Port;
    type Record = PortMetric;
    type Expected = ExpectedPortMetric;

    fn expected(state: &ExpectedState) -> &HashMap<String, Self::Expected> {
        &state.port
    }

    fn fetch<C: Collector + ?Sized>(
        collector: &C,
        names: &[String],
    ) -> Result<Vec<Self::Record>, C::Error> {
        collector.port_metrics(names)
    }

    fn table(records: &[Self::Record]) -> MetricsTable<'_> {
        MetricsTable::new().port(records)
    }
}
