// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::time::{self, DateTime};
use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the collaborators used around request signing.
///
/// ## Important
///
/// Context provides NO default transport. Users MAY configure components they need.
/// An unconfigured transport returns an error when called, the default env is empty
/// and the default clock reads the system time.
///
/// ## Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use elevenpaths_core::{Context, FixedClock, OsEnv};
///
/// let t = Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap();
/// let ctx = Context::new().with_env(OsEnv).with_clock(FixedClock::new(t));
/// assert_eq!(ctx.utc_timestamp(), "2015-06-23 12:48:17");
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
    clock: Arc<dyn Clock>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op transport, empty env and system clock.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Current UTC time from the configured clock.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }

    /// Current UTC time formatted for `X-11Paths-Date`.
    pub fn utc_timestamp(&self) -> String {
        time::format_utc_timestamp(self.now())
    }
}

/// HttpSend is used to send the signed http request.
///
/// Implementations own every transport concern: proxies, TLS, pooling and
/// retries all live behind this trait.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Permits reading configuration from the environment without touching the process env in tests.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }
}

/// Clock supplies the current UTC time used for `X-11Paths-Date`.
///
/// Signing itself never reads the clock, callers do it through this trait
/// so tests can pin the timestamp.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time in UTC.
    fn now(&self) -> DateTime;
}

/// SystemClock reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        time::now()
    }
}

/// FixedClock always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime);

impl FixedClock {
    /// Create a clock frozen at `t`.
    pub fn new(t: DateTime) -> Self {
        Self(t)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}

/// NoopEnv is a no-op implementation that always returns None.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_fixed_clock() {
        let t = Utc.with_ymd_and_hms(2015, 6, 23, 12, 48, 17).unwrap();
        let ctx = Context::new().with_clock(FixedClock::new(t));

        assert_eq!(ctx.now(), t);
        assert_eq!(ctx.utc_timestamp(), "2015-06-23 12:48:17");
    }

    #[test]
    fn test_static_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("KEY".to_string(), "value".to_string())]),
        });

        assert_eq!(ctx.env_var("KEY").as_deref(), Some("value"));
        assert_eq!(ctx.env_var("MISSING"), None);
    }

    #[tokio::test]
    async fn test_noop_http_send() {
        let ctx = Context::new();
        let req = http::Request::get("http://localhost/")
            .body(Bytes::new())
            .unwrap();

        let err = ctx.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
