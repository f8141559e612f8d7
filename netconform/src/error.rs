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

//! Module containing all error types

use crate::metrics::Family;
use std::time::Duration;
use thiserror::Error;

/// Boxed error, as returned by a collector or a polled condition
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type
///
/// Only two kinds of errors leave [`wait_for`](crate::wait_for): the condition never became true
/// ([`Error::Timeout`]), or the condition itself failed ([`Error::Condition`]). Both must abort the
/// scenario. Their messages are worded differently, to tell "never converged" apart from "could not
/// ask".
#[derive(Debug, Error)]
pub enum Error {
    /// The telemetry could not be fetched
    #[error("Cannot fetch {family} metrics: {source}")]
    CollectorError {
        /// Family that was queried
        family: Family,
        /// Error returned by the collector
        #[source]
        source: BoxedError,
    },
    /// The condition did not become true before the deadline
    #[error("timeout occurred while waiting for {condition} (timeout: {timeout:?})")]
    Timeout {
        /// Description of the condition
        condition: String,
        /// Configured timeout
        timeout: Duration,
    },
    /// The condition returned an error while waiting for it
    #[error("error waiting for {condition}: {source}")]
    Condition {
        /// Description of the condition
        condition: String,
        /// Error returned by the condition
        #[source]
        source: BoxedError,
    },
}

impl Error {
    /// Wrap an error returned by a collector
    pub fn collector<E>(family: Family, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CollectorError { family, source: Box::new(cause) }
    }

    /// Returns `true` if the error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
