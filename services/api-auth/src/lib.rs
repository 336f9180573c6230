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

//! Signer and client for the 11PATHS API authentication scheme.
//!
//! Every request carries
//!
//! ```text
//! Authorization: 11PATHS <app_id> <base64(hmac-sha1(secret, string_to_sign))>
//! X-11Paths-Date: yyyy-MM-dd HH:mm:ss
//! ```
//!
//! plus `X-11paths-Body-Hash` or `X-11paths-File-Hash` when a body or a file
//! is signed.
//!
//! ## Example
//!
//! ```
//! use elevenpaths_api_auth::{Credential, RequestSigner};
//! use http::Method;
//!
//! # fn main() -> elevenpaths_core::Result<()> {
//! let signer = RequestSigner::new(Credential::new(
//!     "iy4G8PgdwxZ6z4KhaGDK",
//!     "sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz",
//! )?);
//!
//! let headers = signer.sign(&Method::GET, "/api/0.1", "2015-06-23 12:48:17")?;
//! assert_eq!(
//!     headers.authorization(),
//!     "11PATHS iy4G8PgdwxZ6z4KhaGDK UWB6n+14BNvQsz403ku0D8yt9B4="
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod canonical;

mod client;
pub use client::Client;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{ContentHash, Payload, RequestSigner, SignedHeaders};

pub mod constants;
