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

//! # OTG Server

use crate::types::*;
use crate::{Error, Result};

use isahc::config::SslOption;
use isahc::http::{Request, Response, StatusCode};
use isahc::prelude::*;
use isahc::{Body, HttpClient};
use log::*;
use std::time::Duration;

const METRICS_ENDPOINT: &str = "monitor/metrics";

/// Connection options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtgOptions {
    /// Verify the TLS certificate of the controller. Usually, the controller of a traffic generator
    /// uses a self-signed certificate.
    pub verify_tls: bool,
    /// Timeout of a single request. A request that times out is an error; it is not retried.
    pub timeout: Duration,
}

impl Default for OtgOptions {
    fn default() -> Self {
        Self { verify_tls: true, timeout: Duration::from_secs(10) }
    }
}

impl OtgOptions {
    /// Default options, but accept any certificate
    pub fn insecure() -> Self {
        Self { verify_tls: false, ..Default::default() }
    }
}

/// # OTG Server Handle
///
/// All requests are blocking.
#[derive(Debug)]
pub struct OtgServer {
    location: String,
    client: HttpClient,
}

impl OtgServer {
    /// Create a new handle for the controller at `location` (e.g., `https://localhost:8443`). No
    /// request is sent yet.
    pub fn new(location: impl AsRef<str>, options: OtgOptions) -> Result<Self> {
        let mut builder = HttpClient::builder().timeout(options.timeout);
        if !options.verify_tls {
            builder = builder.ssl_options(
                SslOption::DANGER_ACCEPT_INVALID_CERTS | SslOption::DANGER_ACCEPT_INVALID_HOSTS,
            );
        }
        Ok(Self {
            location: location.as_ref().trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Get the location of the controller
    pub fn location(&self) -> &str {
        self.location.as_ref()
    }

    /// Send a metrics request
    pub fn get_metrics(&self, request: &MetricsRequest) -> Result<MetricsResponse> {
        let body = serde_json::to_string(request)?;
        let response: MetricsResponse =
            serde_json::from_str(&self.request_post(METRICS_ENDPOINT, body)?)?;
        response.warnings.iter().for_each(|w| warn!("OTG warning: {}", w));
        let requested = request.choice.response_choice();
        if response.choice != requested {
            return Err(Error::UnexpectedChoice {
                requested: requested.to_string(),
                received: response.choice,
            });
        }
        Ok(response)
    }

    /// Returns the metrics of the given BGPv4 peers (all peers if `peer_names` is empty)
    pub fn get_bgpv4_metrics(&self, peer_names: &[String]) -> Result<Vec<BgpMetric>> {
        Ok(self.get_metrics(&MetricsRequest::bgpv4(peer_names))?.bgpv4_metrics)
    }

    /// Returns the metrics of the given BGPv6 peers (all peers if `peer_names` is empty)
    pub fn get_bgpv6_metrics(&self, peer_names: &[String]) -> Result<Vec<BgpMetric>> {
        Ok(self.get_metrics(&MetricsRequest::bgpv6(peer_names))?.bgpv6_metrics)
    }

    /// Returns the metrics of the given IS-IS routers (all routers if `router_names` is empty)
    pub fn get_isis_metrics(&self, router_names: &[String]) -> Result<Vec<IsisMetric>> {
        Ok(self.get_metrics(&MetricsRequest::isis(router_names))?.isis_metrics)
    }

    /// Returns the metrics of the given flows (all flows if `flow_names` is empty)
    pub fn get_flow_metrics(&self, flow_names: &[String]) -> Result<Vec<FlowMetric>> {
        Ok(self.get_metrics(&MetricsRequest::flow(flow_names))?.flow_metrics)
    }

    /// Returns the metrics of the given ports (all ports if `port_names` is empty)
    pub fn get_port_metrics(&self, port_names: &[String]) -> Result<Vec<PortMetric>> {
        Ok(self.get_metrics(&MetricsRequest::port(port_names))?.port_metrics)
    }

    fn request_post(&self, key: impl AsRef<str>, data: String) -> Result<String> {
        let addr = format!("{}/{}", self.location, key.as_ref());
        trace!("POST {} {}", addr, data);
        let request =
            Request::post(&addr).header("content-type", "application/json").body(data)?;
        self.handle_response(self.client.send(request)?)
    }

    fn handle_response(&self, mut response: Response<Body>) -> Result<String> {
        let status = response.status();
        let text = response.text()?;
        check_status(status, text)
    }
}

/// Turn a response into the body, or into the error it describes
fn check_status(status: StatusCode, text: String) -> Result<String> {
    if status.is_success() {
        return Ok(text);
    }
    match serde_json::from_str::<OtgErrorResponse>(&text) {
        Ok(e) if !e.errors.is_empty() => {
            e.errors.iter().for_each(|msg| error!("OTG: {}", msg));
            Err(Error::OtgError { code: e.code, kind: e.kind, errors: e.errors })
        }
        _ => Err(Error::ResponseError(status.as_u16(), text)),
    }
}
