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

//! 11PATHS request signer.

use std::fmt::Write;

use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;

use elevenpaths_core::hash::{base64_hmac_sha1, hex_sha1};
use elevenpaths_core::utils::is_blank;
use elevenpaths_core::{Context, Error, Result};

use crate::canonical::{serialize_headers, serialize_params};
use crate::constants::*;
use crate::Credential;

/// The signed content of a request.
///
/// A request signs at most one kind of content, so form params, a raw body
/// and a file can never be mixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Nothing besides method, date and path is signed.
    #[default]
    Empty,
    /// Url-decoded form params sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
    /// Raw request body, signed through `X-11paths-Body-Hash`.
    Body(&'a [u8]),
    /// File content, signed through `X-11paths-File-Hash`.
    File(&'a [u8]),
}

impl Payload<'_> {
    /// Build a form payload from any iterator of pairs.
    pub fn form<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Payload::Form(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// SHA-1 hash of the signed content, tagged with the header it travels in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentHash {
    /// Hash of a raw body.
    Body(String),
    /// Hash of file content.
    File(String),
}

impl ContentHash {
    /// Header name carrying this hash.
    pub fn header_name(&self) -> &'static str {
        match self {
            ContentHash::Body(_) => X_11PATHS_BODY_HASH,
            ContentHash::File(_) => X_11PATHS_FILE_HASH,
        }
    }

    /// Lower-case hex SHA-1.
    pub fn value(&self) -> &str {
        match self {
            ContentHash::Body(v) | ContentHash::File(v) => v,
        }
    }
}

/// Headers produced by signing a request.
///
/// Always `Authorization` and `X-11Paths-Date`, plus the content hash header
/// when a body or file was signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    authorization: String,
    date: String,
    content_hash: Option<ContentHash>,
}

impl SignedHeaders {
    /// Value of the `Authorization` header: `11PATHS <app_id> <signature>`.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Value of the `X-11Paths-Date` header.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Content hash, if a body or file was signed.
    pub fn content_hash(&self) -> Option<&ContentHash> {
        self.content_hash.as_ref()
    }

    /// Look up a header value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            Some((AUTHORIZATION_HEADER, self.authorization.as_str())),
            Some((X_11PATHS_DATE, self.date.as_str())),
            self.content_hash.as_ref().map(|h| (h.header_name(), h.value())),
        ]
        .into_iter()
        .flatten()
    }

    /// Convert into a [`HeaderMap`], `Authorization` is marked sensitive.
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        for (k, v) in self.iter() {
            let mut value = HeaderValue::from_str(v)?;
            if k == AUTHORIZATION_HEADER {
                value.set_sensitive(true);
            }
            headers.insert(HeaderName::from_bytes(k.as_bytes())?, value);
        }

        Ok(headers)
    }

    /// Insert these headers into a request, replacing existing values.
    pub fn apply(&self, parts: &mut http::request::Parts) -> Result<()> {
        for (k, v) in self.to_header_map()? {
            if let Some(k) = k {
                parts.headers.insert(k, v);
            }
        }

        Ok(())
    }
}

/// RequestSigner that implements 11PATHS Authorization.
///
/// Signing is a pure function of its inputs: the signer never reads the clock
/// or the network, so the same inputs always produce the same headers.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
}

impl RequestSigner {
    /// Create a signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    /// The credential used to sign.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign a request without custom headers or params.
    pub fn sign(&self, method: &Method, path: &str, timestamp: &str) -> Result<SignedHeaders> {
        self.sign_payload(method, path, timestamp, &Payload::Empty)
    }

    /// Sign a request whose params are part of the signature.
    pub fn sign_with_params<K, V>(
        &self,
        method: &Method,
        path: &str,
        timestamp: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<SignedHeaders>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.sign_payload(method, path, timestamp, &Payload::form(params))
    }

    /// Sign a request with a raw body, adding `X-11paths-Body-Hash`.
    pub fn sign_with_body(
        &self,
        method: &Method,
        path: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<SignedHeaders> {
        self.sign_payload(method, path, timestamp, &Payload::Body(body))
    }

    /// Sign a request with file content, adding `X-11paths-File-Hash`.
    pub fn sign_with_file(
        &self,
        method: &Method,
        path: &str,
        timestamp: &str,
        file: &[u8],
    ) -> Result<SignedHeaders> {
        self.sign_payload(method, path, timestamp, &Payload::File(file))
    }

    /// Sign a request with the given payload.
    ///
    /// The only custom header covered by the signature is the content hash of
    /// a body or file payload, callers can't add other `X-11paths-` headers.
    ///
    /// `path` is the url-encoded path and query, starting at the first `/`.
    /// `timestamp` must be formatted as `yyyy-MM-dd HH:mm:ss` in UTC.
    pub fn sign_payload(
        &self,
        method: &Method,
        path: &str,
        timestamp: &str,
        payload: &Payload<'_>,
    ) -> Result<SignedHeaders> {
        check_method(method)?;
        if is_blank(path) {
            return Err(Error::request_invalid("path must not be blank"));
        }
        if is_blank(timestamp) {
            return Err(Error::request_invalid("timestamp must not be blank"));
        }

        let content_hash = match payload {
            Payload::Body(body) => Some(ContentHash::Body(hex_sha1(body))),
            Payload::File(file) => Some(ContentHash::File(hex_sha1(file))),
            Payload::Empty | Payload::Form(_) => None,
        };
        let params = match payload {
            Payload::Form(params) => serialize_params(params.iter().map(|(k, v)| (k, v))),
            _ => String::new(),
        };

        let string_to_sign = string_to_sign(
            method,
            timestamp,
            &serialize_headers(content_hash.iter().map(|h| (h.header_name(), h.value()))),
            path,
            &params,
        )?;
        let signature = self.signature(&string_to_sign)?;

        Ok(SignedHeaders {
            authorization: format!(
                "{AUTHORIZATION_METHOD} {} {signature}",
                self.credential.app_id()
            ),
            date: timestamp.to_string(),
            content_hash,
        })
    }

    /// Sign an `http` request in place.
    ///
    /// The timestamp comes from the context clock and the path from the request uri.
    /// Returns the headers that were applied.
    pub fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        payload: &Payload<'_>,
    ) -> Result<SignedHeaders> {
        let timestamp = ctx.utc_timestamp();
        let path = parts
            .uri
            .path_and_query()
            .map(|v| v.as_str())
            .unwrap_or("/");

        let headers = self.sign_payload(&parts.method, path, &timestamp, payload)?;
        headers.apply(parts)?;

        Ok(headers)
    }

    fn signature(&self, string_to_sign: &str) -> Result<String> {
        if !self.credential.secret_key().is_ascii() {
            return Err(Error::encoding_failure("secret key must be ascii"));
        }
        if !self.credential.app_id().is_ascii() {
            return Err(Error::encoding_failure("app id must be ascii"));
        }
        if !string_to_sign.is_ascii() {
            return Err(Error::encoding_failure(
                "string to sign must be ascii, url-encode path and headers first",
            ));
        }

        base64_hmac_sha1(
            self.credential.secret_key().as_bytes(),
            string_to_sign.as_bytes(),
        )
    }
}

fn check_method(method: &Method) -> Result<()> {
    if [Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(method) {
        Ok(())
    } else {
        Err(Error::request_invalid(format!(
            "method {method} is not supported by 11PATHS"
        )))
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Date + "\n" +
/// SerializedHeaders + "\n" +
/// PathAndQuery
/// [+ "\n" + SerializedParams]
/// ```
///
/// The headers line is always present, even when empty.
fn string_to_sign(
    method: &Method,
    timestamp: &str,
    headers: &str,
    path: &str,
    params: &str,
) -> Result<String> {
    let mut s = String::new();
    writeln!(&mut s, "{}", method.as_str().to_ascii_uppercase())?;
    writeln!(&mut s, "{timestamp}")?;
    writeln!(&mut s, "{headers}")?;
    write!(&mut s, "{}", path.trim())?;
    if !params.is_empty() {
        write!(&mut s, "\n{params}")?;
    }

    debug!("string to sign: {}", &s);
    Ok(s)
}
