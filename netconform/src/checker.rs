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

//! # Convergence Checker
//!
//! Compares the records returned by the collector against the [`ExpectedState`]. Only the entities
//! that have an expectation are requested. Every field that is not `None` in the expectation must
//! match the observed value exactly (also for rates, there is no epsilon).
//!
//! A single mismatch fails the whole check. However, the checker does not stop at the first
//! mismatch; all entities are compared, and every mismatch is listed in the [`Report`].

use crate::collector::Collector;
use crate::expected::{Expectation, ExpectedState};
use crate::family::*;
use crate::metrics::{Family, Metric};
use crate::printer;
use crate::Error;

use itertools::Itertools;
use log::*;
use std::collections::HashSet;
use std::fmt;

/// A single difference between the expected and the observed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// A checked field has a different value
    Field {
        /// Name of the entity
        name: String,
        /// Name of the field
        field: &'static str,
        /// Expected value
        expected: String,
        /// Observed value
        observed: String,
    },
    /// The collector did not report an expected entity
    Missing {
        /// Name of the entity
        name: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Field { name, field, expected, observed } => {
                write!(f, "{}: {} is {}, but expected {}", name, field, observed, expected)
            }
            Mismatch::Missing { name } => write!(f, "{}: not reported", name),
        }
    }
}

/// Accumulates the mismatches of one entity. Used by [`Expectation::compare`].
#[derive(Debug)]
pub struct Comparison<'a> {
    name: &'a str,
    mismatches: &'a mut Vec<Mismatch>,
}

impl<'a> Comparison<'a> {
    /// Start comparing the entity `name`, appending all mismatches to `mismatches`.
    pub fn new(name: &'a str, mismatches: &'a mut Vec<Mismatch>) -> Self {
        Self { name, mismatches }
    }

    /// Compare a single field. If `expected` is `None`, the field is ignored.
    pub fn field<T>(&mut self, field: &'static str, expected: &Option<T>, observed: &T) -> &mut Self
    where
        T: PartialEq + fmt::Display,
    {
        if let Some(expected) = expected {
            if expected != observed {
                self.mismatches.push(Mismatch::Field {
                    name: self.name.to_string(),
                    field,
                    expected: expected.to_string(),
                    observed: observed.to_string(),
                });
            }
        }
        self
    }
}

/// Result of a single convergence check of one family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Family that was checked
    pub family: Family,
    /// All mismatches that were found. Empty if the family has converged.
    pub mismatches: Vec<Mismatch>,
    /// Rendered table of the observed records
    pub table: String,
}

impl Report {
    /// Returns `true` if every checked field of every entity matched.
    pub fn is_converged(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Log the table (info) and all mismatches (debug). If `clear_previous` is set, the terminal is
    /// cleared first.
    pub fn print(&self, clear_previous: bool) {
        if clear_previous {
            printer::clear_screen();
        }
        if !self.table.is_empty() {
            info!("{}", self.table);
        }
        for mismatch in self.mismatches.iter() {
            debug!("[{}] {}", self.family, mismatch);
        }
    }
}

/// Check the family `F` against the expected state.
///
/// If the expected state contains no entity of that family, the collector is not queried at all,
/// and the (empty) check passes. Records returned by the collector for which no expectation exists
/// are skipped. Expected entities that are not reported by the collector are mismatches.
pub fn check<F, C>(collector: &C, expected: &ExpectedState) -> Result<Report, Error>
where
    F: MetricFamily,
    C: Collector + ?Sized,
{
    let expected = F::expected(expected);
    if expected.is_empty() {
        return Ok(Report { family: F::FAMILY, mismatches: Vec::new(), table: String::new() });
    }

    let names: Vec<String> = expected.keys().cloned().collect();
    let records = F::fetch(collector, &names).map_err(|e| Error::collector(F::FAMILY, e))?;

    let mut mismatches: Vec<Mismatch> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records.iter() {
        let name = record.name();
        seen.insert(name);
        match expected.get(name) {
            Some(e) => e.compare(record, &mut Comparison::new(name, &mut mismatches)),
            None => debug!("[{}] {} was not requested, skipping", F::FAMILY, name),
        }
    }

    mismatches.extend(
        names
            .iter()
            .filter(|n| !seen.contains(n.as_str()))
            .sorted()
            .map(|n| Mismatch::Missing { name: n.clone() }),
    );

    Ok(Report { family: F::FAMILY, mismatches, table: F::table(&records).render() })
}

/// Check a family selected at runtime. See [`check`].
pub fn check_family<C>(
    family: Family,
    collector: &C,
    expected: &ExpectedState,
) -> Result<Report, Error>
where
    C: Collector + ?Sized,
{
    match family {
        Family::Bgp4 => check::<Bgp4, C>(collector, expected),
        Family::Bgp6 => check::<Bgp6, C>(collector, expected),
        Family::Isis => check::<Isis, C>(collector, expected),
        Family::Flow => check::<Flow, C>(collector, expected),
        Family::Port => check::<Port, C>(collector, expected),
    }
}

/// Check the family `F`, print the report, and return `true` if it has converged. This is the
/// predicate usually passed to [`wait_for`](crate::wait_for):
///
/// ```no_run
/// # use netconform::*;
/// # fn run<C: Collector>(collector: &C, expected: &ExpectedState) -> Result<(), Error> {
/// wait_for(
///     || converged::<Bgp4, _>(collector, expected, false),
///     &WaitForOpts::new("all BGPv4 sessions to be up"),
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn converged<F, C>(
    collector: &C,
    expected: &ExpectedState,
    clear_previous: bool,
) -> Result<bool, Error>
where
    F: MetricFamily,
    C: Collector + ?Sized,
{
    let report = check::<F, C>(collector, expected)?;
    report.print(clear_previous);
    Ok(report.is_converged())
}

/// Check every family that has at least one expected entity. All families are checked, even if an
/// earlier one did not converge. A collector error aborts immediately.
pub fn check_all<C>(collector: &C, expected: &ExpectedState) -> Result<Vec<Report>, Error>
where
    C: Collector + ?Sized,
{
    expected.families().into_iter().map(|f| check_family(f, collector, expected)).collect()
}

/// Returns `true` if every family with at least one expected entity has converged.
pub fn all_converged<C>(collector: &C, expected: &ExpectedState) -> Result<bool, Error>
where
    C: Collector + ?Sized,
{
    let reports = check_all(collector, expected)?;
    reports.iter().for_each(|r| r.print(false));
    Ok(reports.iter().all(|r| r.is_converged()))
}
