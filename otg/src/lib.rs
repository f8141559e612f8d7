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

//! # Open Traffic Generator API
//!
//! This is a very simple crate to query the metrics of an Open Traffic Generator (OTG), i.e., the
//! sessions of the emulated BGP and IS-IS peers, and the frame counters of flows and ports. The
//! traffic generator is configured and started elsewhere; this crate only reads.
//!
//! ```no_run
//! use otg::{OtgOptions, OtgServer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // connect to the controller, accepting its self-signed certificate
//!     let server = OtgServer::new("https://localhost:8443", OtgOptions::insecure())?;
//!
//!     // get the metrics of a single BGPv4 peer
//!     for peer in server.get_bgpv4_metrics(&["p1.bgp4.peer".to_string()])? {
//!         println!("{}: {:?}, {} routes", peer.name, peer.session_state, peer.routes_received);
//!     }
//!
//!     // get all flows
//!     let flows = server.get_flow_metrics(&[])?;
//!     println!("{} flows", flows.len());
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod server;
mod types;
pub use server::{OtgOptions, OtgServer};
pub use types::*;

use thiserror::Error;

/// # OTG Error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error during handling of the HTTP request
    #[allow(clippy::upper_case_acronyms)]
    #[error("HTTP Error: {0}")]
    HTTPError(#[from] isahc::Error),
    /// The HTTP request could not be built
    #[error("Invalid HTTP request: {0}")]
    RequestError(#[from] isahc::http::Error),
    /// Cannot serialize the request or deserialize the response
    #[error("Cannot parse JSON: {0}")]
    JsonError(#[from] serde_json::error::Error),
    /// IO Error
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error reported by the traffic generator
    #[error("OTG Error {code} ({kind}): {}", .errors.join("; "))]
    OtgError {
        /// Error code
        code: i32,
        /// Kind of the error (e.g., validation, internal)
        kind: String,
        /// Error messages
        errors: Vec<String>,
    },
    /// HTTP Response Error, with a body that is not an OTG error
    #[error("HTTP Response Error: {0}. Message:\n{1}")]
    ResponseError(u16, String),
    /// The response contains metrics of a different kind than requested
    #[error("Unexpected metrics response: requested {requested}, but got {received}")]
    UnexpectedChoice {
        /// Requested kind of metrics
        requested: String,
        /// Kind of metrics in the response
        received: String,
    },
}

/// OTG Result type
type Result<T> = core::result::Result<T, Error>;
