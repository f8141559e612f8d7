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

use super::collector::*;
use crate::metrics::BgpSessionState::*;
use crate::metrics::FlowTransmitState::*;
use crate::*;

use maplit::hashmap;

fn bgp4_expected() -> ExpectedState {
    ExpectedState {
        bgp4: hashmap! {"A".to_string() => ExpectedBgpMetric::established(5, 5)},
        ..Default::default()
    }
}

#[test]
fn bgp4_converged() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 5)];

    let report = check::<Bgp4, _>(&collector, &bgp4_expected()).unwrap();
    assert!(report.is_converged());
    assert_eq!(report.family, Family::Bgp4);
    assert!(report.table.contains("Bgpv4 Metrics"));
}

#[test]
fn bgp4_received_mismatch() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 4)];

    let report = check::<Bgp4, _>(&collector, &bgp4_expected()).unwrap();
    assert!(!report.is_converged());
    assert_eq!(
        report.mismatches,
        vec![Mismatch::Field {
            name: "A".to_string(),
            field: "routes_received",
            expected: "5".to_string(),
            observed: "4".to_string(),
        }]
    );
}

#[test]
fn bgp4_session_down() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Down, 5, 5)];
    assert!(!converged::<Bgp4, _>(&collector, &bgp4_expected(), false).unwrap());
}

#[test]
fn bgp6_uses_its_own_expectations() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 4)];
    collector.bgpv6 = vec![bgp("A", Up, 5, 5)];

    let expected = ExpectedState {
        bgp6: hashmap! {"A".to_string() => ExpectedBgpMetric::established(5, 5)},
        ..Default::default()
    };

    assert!(converged::<Bgp6, _>(&collector, &expected, false).unwrap());
    assert_eq!(collector.queries.borrow()[0].0, Family::Bgp6);
}

#[test]
fn only_expected_entities_are_queried() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 5), bgp("B", Down, 0, 0)];

    assert!(converged::<Bgp4, _>(&collector, &bgp4_expected(), false).unwrap());
    let queries = collector.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0], (Family::Bgp4, vec!["A".to_string()]));
}

#[test]
fn empty_family_does_not_query() {
    let collector = StaticCollector::new();
    let report = check::<Flow, _>(&collector, &bgp4_expected()).unwrap();
    assert!(report.is_converged());
    assert!(report.table.is_empty());
    assert_eq!(collector.num_queries(), 0);
}

#[test]
fn unrequested_records_are_skipped() {
    // a collector that ignores the filter must not break the check
    #[derive(Debug)]
    struct IgnoresFilter(StaticCollector);

    impl Collector for IgnoresFilter {
        type Error = Unreachable;
        fn bgpv4_metrics(&self, _: &[String]) -> Result<Vec<BgpMetric>, Unreachable> {
            self.0.bgpv4_metrics(&[])
        }
        fn bgpv6_metrics(&self, _: &[String]) -> Result<Vec<BgpMetric>, Unreachable> {
            self.0.bgpv6_metrics(&[])
        }
        fn isis_metrics(&self, _: &[String]) -> Result<Vec<IsisMetric>, Unreachable> {
            self.0.isis_metrics(&[])
        }
        fn flow_metrics(&self, _: &[String]) -> Result<Vec<FlowMetric>, Unreachable> {
            self.0.flow_metrics(&[])
        }
        fn port_metrics(&self, _: &[String]) -> Result<Vec<PortMetric>, Unreachable> {
            self.0.port_metrics(&[])
        }
    }

    let mut inner = StaticCollector::new();
    inner.bgpv4 = vec![bgp("A", Up, 5, 5), bgp("Z", Down, 1, 2)];
    let collector = IgnoresFilter(inner);

    let report = check::<Bgp4, _>(&collector, &bgp4_expected()).unwrap();
    assert!(report.is_converged());
}

#[test]
fn missing_entity_is_a_mismatch() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 5)];

    let mut expected = bgp4_expected();
    expected.bgp4.insert("B".to_string(), ExpectedBgpMetric::established(5, 5));

    let report = check::<Bgp4, _>(&collector, &expected).unwrap();
    assert_eq!(report.mismatches, vec![Mismatch::Missing { name: "B".to_string() }]);
}

#[test]
fn all_fields_ignored_always_pass() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![BgpMetric {
        name: "A".to_string(),
        session_state: Down,
        session_flap_count: 42,
        routes_advertised: 7,
        routes_received: 1,
        route_withdraws_sent: 3,
        route_withdraws_received: 4,
        keepalives_sent: 100,
        keepalives_received: 99,
    }];
    collector.flow = vec![flow("f1", NotStarted, 0, 12)];
    collector.isis = vec![IsisMetric { name: "r1".to_string(), ..Default::default() }];
    collector.port =
        vec![PortMetric { name: "p1".to_string(), frames_rx: 9, ..Default::default() }];

    let expected = ExpectedState {
        bgp4: hashmap! {"A".to_string() => ExpectedBgpMetric::default()},
        flow: hashmap! {"f1".to_string() => ExpectedFlowMetric::default()},
        isis: hashmap! {"r1".to_string() => ExpectedIsisMetric::default()},
        port: hashmap! {"p1".to_string() => ExpectedPortMetric::default()},
        ..Default::default()
    };

    assert!(all_converged(&collector, &expected).unwrap());
}

#[test]
fn every_mismatch_is_reported() {
    let mut collector = StaticCollector::new();
    collector.flow = vec![
        flow("f1", Stopped, 1000, 999),
        flow("f2", Started, 10, 10),
        flow("f3", Stopped, 3000, 3000),
    ];

    let expected = ExpectedState {
        flow: hashmap! {
            "f1".to_string() => ExpectedFlowMetric::completed(1000),
            "f2".to_string() => ExpectedFlowMetric::completed(2000),
            "f3".to_string() => ExpectedFlowMetric::completed(3000),
        },
        ..Default::default()
    };

    let report = check::<Flow, _>(&collector, &expected).unwrap();
    let mut failed: Vec<&str> = report
        .mismatches
        .iter()
        .map(|m| match m {
            Mismatch::Field { name, .. } => name.as_str(),
            Mismatch::Missing { name } => name.as_str(),
        })
        .collect();
    failed.dedup();
    assert_eq!(failed.len(), 2);
    assert!(failed.contains(&"f1"));
    assert!(failed.contains(&"f2"));
    // f2: transmit, frames_tx, frames_rx
    assert_eq!(report.mismatches.iter().filter(|m| m.to_string().starts_with("f2")).count(), 3);
}

#[test]
fn flow_phases() {
    let mut collector = StaticCollector::new();
    collector.flow = vec![flow("f1", Stopped, 1000, 1000), flow("f2", Started, 1234, 1200)];

    let mut expected = ExpectedState::new();
    expected.flow.insert("f1".to_string(), ExpectedFlowMetric::completed(1000));
    expected.flow.insert("f2".to_string(), ExpectedFlowMetric::running());
    assert!(converged::<Flow, _>(&collector, &expected, false).unwrap());

    expected.flow.insert("f2".to_string(), ExpectedFlowMetric::completed(2000));
    assert!(!converged::<Flow, _>(&collector, &expected, false).unwrap());

    collector.flow[1] = flow("f2", Stopped, 2000, 2000);
    assert!(converged::<Flow, _>(&collector, &expected, false).unwrap());
}

#[test]
fn rates_are_compared_exactly() {
    let mut collector = StaticCollector::new();
    collector.flow = vec![FlowMetric { frames_rx_rate: 0.5, ..flow("f1", Started, 1, 1) }];

    let mut expected = ExpectedState::new();
    let rate_only = ExpectedFlowMetric { frames_rx_rate: Some(0.0), ..Default::default() };
    expected.flow.insert("f1".to_string(), rate_only);
    assert!(!converged::<Flow, _>(&collector, &expected, false).unwrap());

    expected.flow.get_mut("f1").unwrap().frames_rx_rate = Some(0.5);
    assert!(converged::<Flow, _>(&collector, &expected, false).unwrap());
}

#[test]
fn isis_levels() {
    let mut collector = StaticCollector::new();
    collector.isis = vec![IsisMetric {
        name: "r1".to_string(),
        l1_sessions_up: 0,
        l2_sessions_up: 1,
        l1_database_size: 0,
        l2_database_size: 3,
    }];

    let mut expected = ExpectedState::new();
    expected.isis.insert("r1".to_string(), ExpectedIsisMetric::level2(3));
    assert!(converged::<Isis, _>(&collector, &expected, false).unwrap());

    expected.isis.insert("r1".to_string(), ExpectedIsisMetric::level1(3));
    assert!(!converged::<Isis, _>(&collector, &expected, false).unwrap());

    expected.isis.insert("r1".to_string(), ExpectedIsisMetric::level12(3));
    assert!(!converged::<Isis, _>(&collector, &expected, false).unwrap());
}

#[test]
fn port_frames_rx() {
    let mut collector = StaticCollector::new();
    collector.port = vec![PortMetric {
        name: "p1".to_string(),
        frames_tx: 10,
        frames_tx_rate: 0.0,
        frames_rx: 2000,
    }];

    let mut expected = ExpectedState::new();
    expected.port.insert("p1".to_string(), ExpectedPortMetric::frames_rx(2000));
    assert!(converged::<Port, _>(&collector, &expected, false).unwrap());

    expected.port.insert("p1".to_string(), ExpectedPortMetric::frames_rx(1999));
    assert!(!converged::<Port, _>(&collector, &expected, false).unwrap());
}

#[test]
fn check_is_idempotent() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 4)];
    let expected = bgp4_expected();

    let first = check::<Bgp4, _>(&collector, &expected).unwrap();
    let second = check::<Bgp4, _>(&collector, &expected).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.is_converged(), second.is_converged());
}

#[test]
fn collector_error_is_propagated() {
    let collector = StaticCollector::unreachable();
    match check::<Bgp4, _>(&collector, &bgp4_expected()) {
        Err(Error::CollectorError { family: Family::Bgp4, .. }) => {}
        r => panic!("Unexpected result: {:?}", r),
    }
}

#[test]
fn check_all_visits_every_family() {
    let mut collector = StaticCollector::new();
    collector.bgpv4 = vec![bgp("A", Up, 5, 4)];
    collector.flow = vec![flow("f1", Stopped, 1000, 1000)];

    let mut expected = bgp4_expected();
    expected.flow.insert("f1".to_string(), ExpectedFlowMetric::completed(1000));

    let reports = check_all(&collector, &expected).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_converged());
    assert!(reports[1].is_converged());
    assert_eq!(collector.num_queries(), 2);
    assert!(!all_converged(&collector, &expected).unwrap());
}

#[test]
fn snapshot_fetches_requested_families() {
    let mut collector = StaticCollector::new();
    collector.flow = vec![flow("f1", Stopped, 1000, 1000)];
    collector.port = vec![PortMetric { name: "p1".to_string(), ..Default::default() }];

    let snapshot = Snapshot::fetch(&collector, &[Family::Flow, Family::Port]).unwrap();
    assert!(snapshot.bgpv4.is_none());
    assert_eq!(snapshot.flow.as_ref().map(|f| f.len()), Some(1));
    let table = snapshot.table().render();
    assert!(table.contains("Flow Metrics"));
    assert!(table.contains("Port Metrics"));
    assert!(!table.contains("Bgpv4 Metrics"));
}
