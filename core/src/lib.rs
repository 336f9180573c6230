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

//! Core components for signing 11PATHS API requests.
//!
//! This crate provides the foundational types shared by the signer and the
//! transports built on top of it.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending,
//!   environment access and the clock
//! - **Error**: A single error type whose [`ErrorKind`] tells invalid input,
//!   crypto failures and encoding failures apart
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`Clock`]: For reading the current UTC time
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Timestamp formatting for `X-11Paths-Date`
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Clock;
pub use context::Context;
pub use context::Env;
pub use context::FixedClock;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;
pub use context::SystemClock;

mod error;
pub use error::{Error, ErrorKind, Result};
