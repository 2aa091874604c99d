// Copyright 2026 Grzegorz Blach
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Relying party configuration.
//!
//! ## Environment Variables
//! - `RP_ORIGINS`: comma-separated list of accepted origins
//! - `RP_USER_VERIFICATION`: `required`, `preferred` or `discouraged`

use std::env;

use serde::Deserialize;

use crate::types::{
    Error, ExpectedAuthentication, ExpectedRegistration, Result, UserVerificationRequirement,
};
use crate::validator::Validator;

/// Static settings of a relying party.
///
/// Builds the expected values for each ceremony from a challenge the caller
/// issued and, for authentication, the counter stored with the credential.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelyingParty {
    /// Accepted client origins (e.g., `https://example.com`).
    pub origins: Vec<String>,

    /// Whether authentications must carry user verification.
    #[serde(default)]
    pub user_verification: UserVerificationRequirement,
}

impl RelyingParty {
    /// Creates a configuration accepting a single origin.
    ///
    /// # Example
    ///
    /// ```
    /// # use passki_rp::RelyingParty;
    /// let rp = RelyingParty::new("https://example.com");
    /// assert_eq!(rp.origins, vec!["https://example.com".to_string()]);
    /// ```
    pub fn new(origin: &str) -> Self {
        Self {
            origins: vec![origin.to_string()],
            user_verification: UserVerificationRequirement::default(),
        }
    }

    /// Adds another accepted origin.
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origins.push(origin.to_string());
        self
    }

    /// Sets the user verification requirement.
    pub fn with_user_verification(mut self, requirement: UserVerificationRequirement) -> Self {
        self.user_verification = requirement;
        self
    }

    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `RP_ORIGINS` is unset or empty, or if
    /// `RP_USER_VERIFICATION` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let origins: Vec<String> = env::var("RP_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() {
            return Err(Error::malformed("configuration", "RP_ORIGINS is not set"));
        }

        let user_verification = match env::var("RP_USER_VERIFICATION") {
            Ok(value) => serde_json::from_value(serde_json::Value::String(value))
                .map_err(|e| Error::malformed("configuration", e))?,
            Err(_) => UserVerificationRequirement::default(),
        };

        Ok(Self {
            origins,
            user_verification,
        })
    }

    /// Returns a validator accepting the configured origins.
    pub fn origin_validator(&self) -> Validator {
        match self.origins.as_slice() {
            [only] => Validator::exact(only.as_str()),
            many => Validator::any_of(many.iter().cloned()),
        }
    }

    /// Expected values for a registration answering `challenge`.
    pub fn registration(&self, challenge: &str) -> ExpectedRegistration {
        ExpectedRegistration {
            origin: self.origin_validator(),
            challenge: Validator::exact(challenge),
        }
    }

    /// Expected values for an authentication answering `challenge` with a
    /// credential whose last known counter is `counter`.
    pub fn authentication(&self, challenge: &str, counter: u32) -> ExpectedAuthentication {
        ExpectedAuthentication {
            origin: self.origin_validator(),
            challenge: Validator::exact(challenge),
            user_verified: self.user_verification == UserVerificationRequirement::Required,
            counter,
        }
    }
}
