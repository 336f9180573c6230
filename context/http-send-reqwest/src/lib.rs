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

//! [`HttpSend`] implementation backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use elevenpaths_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Proxy, Request};

/// ReqwestHttpSend sends signed requests with a [`reqwest::Client`].
///
/// Timeouts, TLS and pooling are whatever the wrapped client is configured with.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new ReqwestHttpSend that routes every request through `proxy`.
    ///
    /// `proxy` is a proxy url such as `http://127.0.0.1:3128`.
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = Proxy::all(proxy).map_err(|e| {
            Error::config_invalid(format!("invalid proxy url {proxy:?}")).with_source(e)
        })?;
        let client = Client::builder().proxy(proxy).build().map_err(|e| {
            Error::config_invalid("failed to build http client with proxy").with_source(e)
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        debug!("sending request: {} {}", req.method(), req.uri());

        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert http request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to send http request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read http response").with_source(e))?;

        debug!("got response: {}", parts.status);
        Ok(http::Response::from_parts(parts, bs))
    }
}
