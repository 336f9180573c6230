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

//! Names and encode sets used on the wire.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Env name for [`Config::base_url`](crate::Config::base_url).
pub const ELEVENPATHS_BASE_URL: &str = "ELEVENPATHS_BASE_URL";
/// Env name for [`Config::app_id`](crate::Config::app_id).
pub const ELEVENPATHS_APP_ID: &str = "ELEVENPATHS_APP_ID";
/// Env name for [`Config::secret_key`](crate::Config::secret_key).
pub const ELEVENPATHS_SECRET_KEY: &str = "ELEVENPATHS_SECRET_KEY";

// Header names, these must match the server byte for byte.

/// Prefix of custom headers taking part in the signature, matched case-insensitively.
pub const X_11PATHS_HEADER_PREFIX: &str = "X-11paths-";
/// Header carrying the signing timestamp.
pub const X_11PATHS_DATE: &str = "X-11Paths-Date";
/// Header carrying the SHA-1 of a signed body.
pub const X_11PATHS_BODY_HASH: &str = "X-11paths-Body-Hash";
/// Header carrying the SHA-1 of a signed file.
pub const X_11PATHS_FILE_HASH: &str = "X-11paths-File-Hash";
/// Header carrying the signature.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Scheme name at the start of the `Authorization` value.
pub const AUTHORIZATION_METHOD: &str = "11PATHS";

/// Content type of form bodies.
pub const CONTENT_TYPE_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
/// Content type of JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// AsciiSet for form values in the signed params line.
///
/// Keeps `-_.!*()` as-is. Space is left out of the set so the caller can
/// turn it into `+`.
pub static FORM_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')')
    .remove(b' ');

/// AsciiSet for query strings, RFC 3986 unreserved characters are kept.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
