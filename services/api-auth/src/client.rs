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

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderValue, Method, Uri};
use log::debug;

use elevenpaths_core::utils::is_blank;
use elevenpaths_core::{Context, Error, Result};

use crate::canonical::{encode_query, serialize_params};
use crate::constants::*;
use crate::{Config, Credential, Payload, RequestSigner};

/// Client sends signed requests to an 11PATHS API.
///
/// The transport and the clock come from the [`Context`], so tests can swap in
/// a recording `HttpSend` and a `FixedClock`. Responses are returned as-is.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    scheme: Scheme,
    authority: Authority,
    signer: RequestSigner,
}

impl Client {
    /// Create a new client.
    ///
    /// `base_url` must be an absolute `http` or `https` url. Request paths are
    /// resolved from its root, any path it carries is ignored.
    pub fn new(ctx: Context, base_url: &str, credential: Credential) -> Result<Self> {
        if is_blank(base_url) {
            return Err(Error::config_invalid("base url must not be blank"));
        }

        let uri: Uri = base_url.trim().parse().map_err(|e| {
            Error::config_invalid(format!("invalid base url {base_url:?}")).with_source(e)
        })?;
        let parts = uri.into_parts();
        let scheme = parts
            .scheme
            .filter(|s| *s == Scheme::HTTP || *s == Scheme::HTTPS)
            .ok_or_else(|| Error::config_invalid("base url must use http or https"))?;
        let authority = parts
            .authority
            .ok_or_else(|| Error::config_invalid("base url must have a host"))?;

        Ok(Self {
            ctx,
            scheme,
            authority,
            signer: RequestSigner::new(credential),
        })
    }

    /// Create a new client from config.
    pub fn from_config(ctx: Context, config: &Config) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| Error::config_invalid("base_url is required to build client"))?;
        let credential = config.credential()?;

        Self::new(ctx, base_url, credential)
    }

    /// The signer used by this client.
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Send a signed GET request.
    ///
    /// `query` is appended to `path` and signed as part of it.
    pub async fn get<K, V>(
        &self,
        path: &str,
        query: impl IntoIterator<Item = (K, V)>,
    ) -> Result<http::Response<Bytes>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = append_query(path, &encode_query(query));
        self.send(Method::GET, &path, Payload::Empty, Bytes::new(), None)
            .await
    }

    /// Send a signed DELETE request.
    pub async fn delete(&self, path: &str) -> Result<http::Response<Bytes>> {
        self.send(Method::DELETE, path, Payload::Empty, Bytes::new(), None)
            .await
    }

    /// Send a signed POST request with a form body.
    pub async fn post_form<K, V>(
        &self,
        path: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<http::Response<Bytes>>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.send_form(Method::POST, path, Payload::form(params))
            .await
    }

    /// Send a signed PUT request with a form body.
    pub async fn put_form<K, V>(
        &self,
        path: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<http::Response<Bytes>>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.send_form(Method::PUT, path, Payload::form(params))
            .await
    }

    /// Send a signed POST request with a JSON body.
    pub async fn post_json(&self, path: &str, body: &str) -> Result<http::Response<Bytes>> {
        self.send_json(Method::POST, path, body).await
    }

    /// Send a signed PUT request with a JSON body.
    pub async fn put_json(&self, path: &str, body: &str) -> Result<http::Response<Bytes>> {
        self.send_json(Method::PUT, path, body).await
    }

    /// Send a signed POST request uploading a file.
    ///
    /// The signature covers `file_content` through `X-11paths-File-Hash`.
    /// `upload_body` is the already encoded request body (for example a
    /// multipart envelope around `file_content`) and `content_type` its type.
    pub async fn post_file(
        &self,
        path: &str,
        file_content: &[u8],
        upload_body: Bytes,
        content_type: &str,
    ) -> Result<http::Response<Bytes>> {
        self.send(
            Method::POST,
            path,
            Payload::File(file_content),
            upload_body,
            Some(content_type),
        )
        .await
    }

    async fn send_form(
        &self,
        method: Method,
        path: &str,
        payload: Payload<'_>,
    ) -> Result<http::Response<Bytes>> {
        let body = match &payload {
            Payload::Form(params) => serialize_params(params.iter().map(|(k, v)| (k, v))),
            _ => String::new(),
        };

        self.send(
            method,
            path,
            payload,
            Bytes::from(body),
            Some(CONTENT_TYPE_FORM_URLENCODED),
        )
        .await
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &str,
    ) -> Result<http::Response<Bytes>> {
        self.send(
            method,
            path,
            Payload::Body(body.as_bytes()),
            Bytes::copy_from_slice(body.as_bytes()),
            Some(CONTENT_TYPE_JSON),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Payload<'_>,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<http::Response<Bytes>> {
        let uri = self.resolve(path)?;
        let (mut parts, body) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)?
            .into_parts();

        self.signer.sign_request(&self.ctx, &mut parts, &payload)?;
        if let Some(content_type) = content_type {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);
        }

        debug!("sending signed request: {} {}", parts.method, parts.uri);
        self.ctx
            .http_send(http::Request::from_parts(parts, body))
            .await
    }

    /// Resolve `path` against the base url.
    fn resolve(&self, path: &str) -> Result<Uri> {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::request_invalid("path must not be blank"));
        }
        if !path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "path {path:?} must start with '/'"
            )));
        }

        let uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path.parse::<PathAndQuery>()?)
            .build()?;
        Ok(uri)
    }
}

fn append_query(path: &str, query: &str) -> String {
    match query.strip_prefix('?') {
        Some(rest) if path.contains('?') => format!("{path}&{rest}"),
        _ => format!("{path}{query}"),
    }
}
