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

//! Canonical serialization of custom headers and params.
//!
//! Every function here sorts with `Ord` on `String`, which compares bytes,
//! so the output never depends on input order or on the platform locale.

use percent_encoding::utf8_percent_encode;

use crate::constants::*;

/// Serialize `X-11paths-` headers into the single line used in the string to sign.
///
/// ```text
/// [("X-11paths-B", "2"), ("Accept", "*/*"), ("x-11paths-a", "1")] => "x-11paths-a:1 x-11paths-b:2"
/// ```
///
/// - Names without the prefix (case-insensitive) are dropped.
/// - Names are lower-cased and sorted, newlines in values become spaces.
/// - Trailing spaces of the joined line are stripped.
/// - Returns an empty string if nothing is left.
pub fn serialize_headers<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut headers: Vec<(String, String)> = headers
        .into_iter()
        .filter(|(k, _)| is_custom_header(k.as_ref()))
        .map(|(k, v)| (k.as_ref().to_lowercase(), v.as_ref().replace('\n', " ")))
        .collect();
    // Sort via lower-cased header name.
    headers.sort();

    let mut s = String::with_capacity(64);
    for (idx, (k, v)) in headers.into_iter().enumerate() {
        if idx != 0 {
            s.push(' ');
        }

        s.push_str(&k);
        s.push(':');
        s.push_str(&v);
    }

    // Trailing spaces, including replaced newlines, are not signed.
    let len = s.trim_end_matches(' ').len();
    s.truncate(len);
    s
}

/// Serialize params into the `key=value&...` line used in the string to sign.
///
/// ```text
/// [("name", "Api"), ("lastName", "Sdk test")] => "lastName=Sdk+test&name=Api"
/// ```
///
/// Params are sorted by their raw key and then form-encoded.
/// Returns an empty string if there are no params.
pub fn serialize_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();
    // Sort via raw key, before encoding.
    params.sort();

    let mut s = String::with_capacity(64);
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&form_encode(k));
        s.push('=');
        s.push_str(&form_encode(v));
    }

    s
}

/// Build the query string appended to a request path.
///
/// Pairs keep the caller's order. Returns an empty string for no params,
/// otherwise the result starts with `?`.
///
/// ```text
/// [("q", "a b"), ("page", "1")] => "?q=a%20b&page=1"
/// ```
pub fn encode_query<K, V>(params: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut s = String::new();
    for (k, v) in params {
        s.push(if s.is_empty() { '?' } else { '&' });
        s.extend(utf8_percent_encode(k.as_ref(), &QUERY_ENCODE_SET));
        s.push('=');
        s.extend(utf8_percent_encode(v.as_ref(), &QUERY_ENCODE_SET));
    }

    s
}

/// Returns true if `name` carries the `X-11paths-` prefix, ignoring case.
pub fn is_custom_header(name: &str) -> bool {
    name.get(..X_11PATHS_HEADER_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(X_11PATHS_HEADER_PREFIX))
}

fn form_encode(v: &str) -> String {
    utf8_percent_encode(v, &FORM_ENCODE_SET)
        .to_string()
        .replace(' ', "+")
}
