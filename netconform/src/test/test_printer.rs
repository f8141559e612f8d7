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

use crate::*;

#[test]
fn bgp_table_layout() {
    let peers = vec![BgpMetric {
        name: "p1.bgp4.peer".to_string(),
        session_state: BgpSessionState::Up,
        routes_advertised: 5,
        routes_received: 5,
        keepalives_sent: 12,
        ..Default::default()
    }];
    let out = MetricsTable::new().bgpv4(&peers).render();
    let lines: Vec<&str> = out.lines().collect();

    let border = "-".repeat(20 * 9 + 5);
    assert_eq!(lines.iter().filter(|l| **l == border).count(), 2);
    let title = lines.iter().position(|l| *l == "Bgpv4 Metrics").unwrap();
    assert_eq!(lines[title + 1], border);
    assert!(lines[title + 2].starts_with(&format!("{:<20}{:<20}", "Name", "Session State")));
    assert_eq!(lines[title + 2].len(), 20 * 9);
    assert_eq!(
        lines[title + 3],
        format!(
            "{:<20}{:<20}{:<20}{:<20}{:<20}{:<20}{:<20}{:<20}{:<20}",
            "p1.bgp4.peer", "up", 0, 5, 5, 0, 0, 12, 0
        )
    );
    assert_eq!(lines[title + 4], border);
}

#[test]
fn flow_and_port_widths() {
    let flows = vec![FlowMetric {
        name: "f1".to_string(),
        transmit: FlowTransmitState::Started,
        frames_tx: 100,
        frames_tx_rate: 12.5,
        frames_rx: 99,
        frames_rx_rate: 12.0,
    }];
    let ports = vec![PortMetric { name: "p1".to_string(), frames_tx: 100, ..Default::default() }];
    let out = MetricsTable::new().flow(&flows).port(&ports).render();

    assert!(out.contains(&"-".repeat(15 * 6 + 5)));
    assert!(out.contains(&"-".repeat(15 * 4 + 5)));
    let row = format!("{:<15}{:<15}{:<15}{:<15}{:<15}{:<15}", "f1", "started", 100, 99, 12.5, 12);
    assert!(out.contains(&row));
    // ports are printed before flows
    assert!(out.find("Port Metrics").unwrap() < out.find("Flow Metrics").unwrap());
}

#[test]
fn empty_families_print_header() {
    let out = MetricsTable::new().isis(&[]).render();
    assert!(out.contains("Isis Metrics"));
    assert!(out.contains("L2 Database Size"));
    assert!(!out.contains("Bgpv4"));
}

#[test]
fn nothing_to_print() {
    assert_eq!(MetricsTable::new().render(), "\n");
}
