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

//! Client data parsing and verification for WebAuthn operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ContextField, Error, Result};
use crate::utils;
use crate::validator::Validator;

/// The type of WebAuthn operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientDataType {
    /// Registration operation ("webauthn.create").
    Create,
    /// Authentication operation ("webauthn.get").
    Get,
}

impl ClientDataType {
    /// Returns the string representation used in the client data JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientDataType::Create => "webauthn.create",
            ClientDataType::Get => "webauthn.get",
        }
    }
}

impl fmt::Display for ClientDataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed client data from WebAuthn operations.
///
/// This structure contains the fields of the client data JSON that is
/// produced by the browser during registration and authentication. The
/// `type_` field is kept verbatim so that an unexpected value can be
/// reported as observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    /// The ceremony type, "webauthn.create" or "webauthn.get".
    #[serde(rename = "type")]
    pub type_: String,

    /// The challenge that was signed (base64url-encoded).
    pub challenge: String,

    /// The origin of the requesting page.
    pub origin: String,

    /// Whether the request came from a cross-origin iframe.
    #[serde(default)]
    pub cross_origin: bool,
}

impl ClientData {
    /// Parses client data from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a required field is missing.
    pub fn from_bytes(bytes: &[u8]) -> Result<ClientData> {
        serde_json::from_slice(bytes).map_err(|e| Error::malformed("client data", e))
    }

    /// Parses a base64url-encoded client data JSON string.
    ///
    /// The challenge field can be used to look up pending ceremony state
    /// before calling the verifiers.
    ///
    /// # Example
    ///
    /// ```
    /// # use passki_rp::ClientData;
    /// # /*
    /// let client_data = ClientData::from_base64(&credential.client_data)?;
    /// let expected = pending.remove(&client_data.challenge)
    ///     .ok_or("No pending state")?;
    /// # */
    /// ```
    #[inline]
    pub fn from_base64(client_data: &str) -> Result<ClientData> {
        let bytes = utils::parse_base64url(client_data)?;
        Self::from_bytes(&bytes)
    }

    /// Verifies the client data against the expected ceremony, origin and
    /// challenge, in that order.
    pub(crate) async fn verify(
        &self,
        expected_type: ClientDataType,
        origin: &Validator,
        challenge: &Validator,
    ) -> Result<()> {
        if self.type_ != expected_type.as_str() {
            tracing::debug!(observed = %self.type_, expected = %expected_type, "client data type rejected");
            return Err(Error::UnexpectedType {
                expected: expected_type.as_str(),
                observed: self.type_.clone(),
            });
        }

        origin.require(ContextField::Origin, &self.origin).await?;
        challenge
            .require(ContextField::Challenge, &self.challenge)
            .await?;

        Ok(())
    }
}
