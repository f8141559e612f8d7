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

//! # Route Conservation
//!
//! In a full mesh, every peer must receive every route advertised by all other peers, and nothing
//! from itself.

/// Check the route conservation law of a full mesh. `tx[i]` and `rx[i]` are the number of routes
/// advertised and received by peer `i`.
///
/// Returns `true` if and only if both slices have the same length, every peer advertised at least
/// one route, and for every peer `i`, `rx[i] == sum(tx) - tx[i]`. If `sum(tx)` does not fit into
/// a `u64`, the law cannot hold, and `false` is returned. A violation is not an error; it is up to
/// the caller to fail the scenario.
///
/// ```
/// use netconform::routes_conserved;
///
/// assert!(routes_conserved(&[5, 5, 5], &[10, 10, 10]));
/// assert!(!routes_conserved(&[5, 0], &[0, 5]));
/// ```
pub fn routes_conserved(tx: &[u64], rx: &[u64]) -> bool {
    if tx.len() != rx.len() {
        return false;
    }

    // a peer without any advertisement makes the law meaningless
    if tx.iter().any(|t| *t == 0) {
        return false;
    }

    let total = match tx.iter().try_fold(0u64, |acc, t| acc.checked_add(*t)) {
        Some(total) => total,
        None => return false,
    };
    // total >= t for every peer, since the sum did not overflow
    tx.iter().zip(rx.iter()).all(|(t, r)| *r == total - *t)
}
