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

//! # Poll Until Condition
//!
//! Blocking, single threaded polling of a condition. The condition is called on the current thread
//! until it returns `Ok(true)`, returns an error, or the timeout has elapsed. There is no other way
//! of stopping the loop.

use crate::error::{BoxedError, Error};

use log::*;
use std::thread;
use std::time::{Duration, Instant};

/// Interval between two calls of the condition, if none is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
/// Time after which waiting is given up, if none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONDITION: &str = "condition to be true";

/// Options for [`wait_for`] and [`watch`].
///
/// A zero `interval` or `timeout` is replaced by [`DEFAULT_INTERVAL`] and [`DEFAULT_TIMEOUT`]. In
/// particular, a zero interval never results in a busy loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForOpts {
    /// Description of the condition, used in the logs and in the error messages
    pub condition: String,
    /// Time to sleep between two calls of the condition
    pub interval: Duration,
    /// Time after which the condition is no longer polled
    pub timeout: Duration,
}

impl Default for WaitForOpts {
    fn default() -> Self {
        Self {
            condition: DEFAULT_CONDITION.to_string(),
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WaitForOpts {
    /// Options for the given condition, with the default interval and timeout.
    pub fn new(condition: impl Into<String>) -> Self {
        Self { condition: condition.into(), ..Default::default() }
    }

    /// Set the interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interval that is actually used
    pub fn effective_interval(&self) -> Duration {
        if self.interval == Duration::from_secs(0) {
            DEFAULT_INTERVAL
        } else {
            self.interval
        }
    }

    /// Timeout that is actually used
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout == Duration::from_secs(0) {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

/// Logs the time elapsed since its creation when dropped.
#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), start: Instant::now() }
    }

    /// Time elapsed since the timer was started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("{} took {} ms", self.name, self.start.elapsed().as_millis());
    }
}

/// # Wait for a condition
///
/// Call `condition` until it returns `Ok(true)`, sleeping `opts.interval` between two calls.
///
/// - `Ok(true)`: Returns `Ok(())` immediately, without calling the condition again.
/// - `Err(e)`: Returns [`Error::Condition`] immediately. Errors are never retried.
/// - `Ok(false)`: If the time elapsed since the first call has reached `opts.timeout`, returns
///   [`Error::Timeout`]. Otherwise, sleeps and tries again. The sleep is cut short at the deadline,
///   such that the condition gets one last call right at the deadline.
///
/// The deadline is only checked between two calls. Hence, the total time spent can be the timeout
/// plus the duration of a single call.
///
/// Both errors must be treated as fatal by the caller.
pub fn wait_for<F, E>(mut condition: F, opts: &WaitForOpts) -> Result<(), Error>
where
    F: FnMut() -> Result<bool, E>,
    E: Into<BoxedError>,
{
    let interval = opts.effective_interval();
    let timeout = opts.effective_timeout();
    let _timer = Timer::new(format!("Waiting for {}", opts.condition));

    info!("Waiting for {} ...", opts.condition);
    let start = Instant::now();

    loop {
        let done = condition()
            .map_err(|e| Error::Condition { condition: opts.condition.clone(), source: e.into() })?;
        if done {
            info!("Done waiting for {}", opts.condition);
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            error!("Timeout while waiting for {}", opts.condition);
            return Err(Error::Timeout { condition: opts.condition.clone(), timeout });
        }
        thread::sleep(interval.min(timeout - elapsed));
    }
}

/// # Watch until the timeout
///
/// Call `tick` every `opts.interval` until `opts.timeout` has elapsed. Reaching the timeout is the
/// normal way of finishing, and returns `Ok(())`. An error returned by `tick` aborts immediately.
/// This is used to observe the metrics while traffic is running.
pub fn watch<F, E>(mut tick: F, opts: &WaitForOpts) -> Result<(), Error>
where
    F: FnMut() -> Result<(), E>,
    E: Into<BoxedError>,
{
    let interval = opts.effective_interval();
    let timeout = opts.effective_timeout();
    let _timer = Timer::new(format!("Watching {}", opts.condition));

    info!("Watching {} for {} ms ...", opts.condition, timeout.as_millis());
    let start = Instant::now();

    loop {
        tick()
            .map_err(|e| Error::Condition { condition: opts.condition.clone(), source: e.into() })?;

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            info!("Done watching {}", opts.condition);
            return Ok(());
        }
        thread::sleep(interval.min(timeout - elapsed));
    }
}
