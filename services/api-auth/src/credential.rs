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

use elevenpaths_core::utils::{is_blank, Redact};
use elevenpaths_core::{Error, Result};

/// Credential for the 11PATHS API.
///
/// Both values are validated once here and never change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    app_id: String,
    secret_key: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// Returns a `CredentialInvalid` error if either value is blank.
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let secret_key = secret_key.into();

        if is_blank(&app_id) {
            return Err(Error::credential_invalid("app id must not be blank"));
        }
        if is_blank(&secret_key) {
            return Err(Error::credential_invalid("secret key must not be blank"));
        }

        Ok(Self { app_id, secret_key })
    }

    /// Application id, sent in the `Authorization` header.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Secret key, only ever used as the HMAC key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &Redact::from(&self.app_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevenpaths_core::ErrorKind;

    #[test]
    fn test_new() -> Result<()> {
        let cred = Credential::new(
            "iy4G8PgdwxZ6z4KhaGDK",
            "sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz",
        )?;
        assert_eq!(cred.app_id(), "iy4G8PgdwxZ6z4KhaGDK");
        assert_eq!(
            cred.secret_key(),
            "sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz"
        );
        Ok(())
    }

    #[test]
    fn test_new_blank() {
        for (app_id, secret_key) in [("", "secret"), ("  ", "secret"), ("app", ""), ("app", "\t")] {
            let err = Credential::new(app_id, secret_key).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        }
    }

    #[test]
    fn test_debug_redacts() -> Result<()> {
        let cred = Credential::new(
            "iy4G8PgdwxZ6z4KhaGDK",
            "sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz",
        )?;
        let s = format!("{cred:?}");

        assert!(!s.contains("sEuLkTNfPfBpZJ3bwHs4FvixsQbdDqppi8kB4rcz"));
        assert_eq!(
            s,
            r#"Credential { app_id: iy4***GDK, secret_key: sEu***rcz }"#
        );
        Ok(())
    }
}
