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

//! # Helper (printer) functions for metrics
//!
//! Renders metric records as tables with fixed column widths. The tables are meant to be read by
//! humans while polling, not to be parsed.

use crate::metrics::*;

use log::*;
use std::fmt::Write;

/// Row of a metrics table
trait TableRow {
    /// Width of every column
    const WIDTH: usize;
    /// Column headers
    const HEADER: &'static [&'static str];
    /// Cells of this row, in the same order as the header
    fn cells(&self) -> Vec<String>;
}

impl TableRow for BgpMetric {
    const WIDTH: usize = 20;
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Session State",
        "Session Flaps",
        "Routes Advertised",
        "Routes Received",
        "Route Withdraws Tx",
        "Route Withdraws Rx",
        "Keepalives Tx",
        "Keepalives Rx",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.session_state.to_string(),
            self.session_flap_count.to_string(),
            self.routes_advertised.to_string(),
            self.routes_received.to_string(),
            self.route_withdraws_sent.to_string(),
            self.route_withdraws_received.to_string(),
            self.keepalives_sent.to_string(),
            self.keepalives_received.to_string(),
        ]
    }
}

impl TableRow for IsisMetric {
    const WIDTH: usize = 20;
    const HEADER: &'static [&'static str] =
        &["Name", "L1 Sessions Up", "L2 Sessions Up", "L1 Database Size", "L2 Database Size"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.l1_sessions_up.to_string(),
            self.l2_sessions_up.to_string(),
            self.l1_database_size.to_string(),
            self.l2_database_size.to_string(),
        ]
    }
}

impl TableRow for PortMetric {
    const WIDTH: usize = 15;
    const HEADER: &'static [&'static str] = &["Name", "Frames Tx", "Frames Rx", "FPS Tx"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.frames_tx.to_string(),
            self.frames_rx.to_string(),
            self.frames_tx_rate.to_string(),
        ]
    }
}

impl TableRow for FlowMetric {
    const WIDTH: usize = 15;
    const HEADER: &'static [&'static str] =
        &["Name", "Transmit", "Frames Tx", "Frames Rx", "FPS Tx", "FPS Rx"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.transmit.to_string(),
            self.frames_tx.to_string(),
            self.frames_rx.to_string(),
            self.frames_tx_rate.to_string(),
            self.frames_rx_rate.to_string(),
        ]
    }
}

/// # Metrics Table
///
/// Collects the records of several families and renders them one table after the other.
///
/// ```
/// use netconform::{MetricsTable, PortMetric};
///
/// let ports = vec![PortMetric { name: "p1".to_string(), frames_tx: 10, ..Default::default() }];
/// let table = MetricsTable::new().port(&ports).render();
/// assert!(table.contains("Port Metrics"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsTable<'a> {
    clear_previous: bool,
    bgpv4: Option<&'a [BgpMetric]>,
    bgpv6: Option<&'a [BgpMetric]>,
    isis: Option<&'a [IsisMetric]>,
    port: Option<&'a [PortMetric]>,
    flow: Option<&'a [FlowMetric]>,
}

impl<'a> MetricsTable<'a> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the terminal before printing, for live updating displays.
    pub fn clear_previous(mut self, clear_previous: bool) -> Self {
        self.clear_previous = clear_previous;
        self
    }

    /// Add BGPv4 metrics
    pub fn bgpv4(mut self, metrics: &'a [BgpMetric]) -> Self {
        self.bgpv4 = Some(metrics);
        self
    }

    /// Add BGPv6 metrics
    pub fn bgpv6(mut self, metrics: &'a [BgpMetric]) -> Self {
        self.bgpv6 = Some(metrics);
        self
    }

    /// Add IS-IS metrics
    pub fn isis(mut self, metrics: &'a [IsisMetric]) -> Self {
        self.isis = Some(metrics);
        self
    }

    /// Add port metrics
    pub fn port(mut self, metrics: &'a [PortMetric]) -> Self {
        self.port = Some(metrics);
        self
    }

    /// Add flow metrics
    pub fn flow(mut self, metrics: &'a [FlowMetric]) -> Self {
        self.flow = Some(metrics);
        self
    }

    /// Render all added families. Families without any record still print their header.
    pub fn render(&self) -> String {
        let mut out = String::from("\n");
        if let Some(m) = self.bgpv4 {
            section(&mut out, "Bgpv4 Metrics", m);
        }
        if let Some(m) = self.bgpv6 {
            section(&mut out, "Bgpv6 Metrics", m);
        }
        if let Some(m) = self.isis {
            section(&mut out, "Isis Metrics", m);
        }
        if let Some(m) = self.port {
            section(&mut out, "Port Metrics", m);
        }
        if let Some(m) = self.flow {
            section(&mut out, "Flow Metrics", m);
        }
        out
    }

    /// Render the table and log it (info level).
    pub fn print(&self) {
        let out = self.render();
        if self.clear_previous {
            clear_screen();
        }
        info!("{}", out);
    }
}

/// Clear the terminal. Failures (e.g., no terminal attached) are only logged.
pub fn clear_screen() {
    if let Err(e) = console::Term::stdout().clear_screen() {
        debug!("Cannot clear the screen: {}", e);
    }
}

fn section<R: TableRow>(out: &mut String, title: &str, rows: &[R]) {
    let border = "-".repeat(R::WIDTH * R::HEADER.len() + 5);
    // writing into a String never fails
    let _ = writeln!(out, "\n{}\n{}", title, border);
    row(out, R::WIDTH, R::HEADER.iter());
    for r in rows {
        row(out, R::WIDTH, r.cells().iter());
    }
    let _ = writeln!(out, "{}\n", border);
}

fn row<I, S>(out: &mut String, width: usize, cells: I)
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    for cell in cells {
        let _ = write!(out, "{:<width$}", cell.as_ref(), width = width);
    }
    out.push('\n');
}
