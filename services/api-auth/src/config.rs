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

use std::fmt::{Debug, Formatter};

use elevenpaths_core::{utils::Redact, Context, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for an 11PATHS API client.
#[derive(Clone, Default)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ELEVENPATHS_BASE_URL`]
    pub base_url: Option<String>,
    /// `app_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ELEVENPATHS_APP_ID`]
    pub app_id: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ELEVENPATHS_SECRET_KEY`]
    pub secret_key: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set app_id
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Load config from env.
    ///
    /// Values already set on this config take precedence.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ELEVENPATHS_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ELEVENPATHS_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ELEVENPATHS_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    /// Build the credential described by this config.
    pub fn credential(&self) -> Result<Credential> {
        let (Some(app_id), Some(secret_key)) = (&self.app_id, &self.secret_key) else {
            return Err(Error::config_invalid(
                "app_id and secret_key are required to build credential",
            ));
        };

        Credential::new(app_id, secret_key)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("app_id", &Redact::from(&self.app_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}
