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

//! # Runtime System
//!
//! This crate connects the convergence checks of `netconform` to a running Open Traffic Generator.
//! [`OtgCollector`] fetches the telemetry over the OTG API, and the [`scenario`] module contains
//! the checks that are used by most test scenarios. For the simplest usage, check the function
//! [`wait_converged`].

#![deny(missing_docs, missing_debug_implementations)]

pub mod collector;
pub mod scenario;

pub use collector::OtgCollector;
pub use scenario::wait_converged;
