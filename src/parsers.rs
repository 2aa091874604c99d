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

//! Decoding of credentials sent by the client.
//!
//! Parsing never checks anything beyond structure; the verifiers do that.

use serde::{Deserialize, Serialize};

use crate::authenticator_data::AuthenticatorData;
use crate::client_data::ClientData;
use crate::types::{CredentialKey, Result};

/// Credential data returned by the client after registration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCredential {
    /// The account name the credential is registered for.
    pub username: String,

    /// The new credential and its public key.
    pub credential: CredentialKey,

    /// The authenticator data (base64url-encoded).
    pub authenticator_data: String,

    /// The client data JSON (base64url-encoded).
    pub client_data: String,

    /// The attestation object (base64url-encoded), if one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation_data: Option<String>,
}

/// Credential data returned by the client after authentication.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationCredential {
    /// The credential ID that was used (base64url-encoded).
    pub credential_id: String,

    /// The authenticator data (base64url-encoded).
    pub authenticator_data: String,

    /// The client data JSON (base64url-encoded).
    pub client_data: String,

    /// The signature over the authenticator data and client data hash (base64url-encoded).
    pub signature: String,

    /// The user handle, returned for discoverable credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

/// A decoded registration.
#[derive(Clone, Debug)]
pub struct Registration {
    /// The account name the credential is registered for.
    pub username: String,

    /// The credential to store once the registration is verified.
    pub credential: CredentialKey,

    /// Decoded client data.
    pub client: ClientData,

    /// Decoded authenticator data.
    pub authenticator: AuthenticatorData,

    /// The attestation object, left undecoded.
    pub attestation_data: Option<String>,
}

/// A decoded authentication.
#[derive(Clone, Debug)]
pub struct Authentication {
    /// The credential ID that was used (base64url-encoded).
    pub credential_id: String,

    /// Decoded client data.
    pub client: ClientData,

    /// Decoded authenticator data.
    pub authenticator: AuthenticatorData,

    /// The signature as transmitted (base64url-encoded).
    pub signature: String,

    /// The user handle, if any.
    pub user_handle: Option<String>,
}

/// Decodes base64url client data JSON.
#[inline]
pub fn parse_client(client_data: &str) -> Result<ClientData> {
    ClientData::from_base64(client_data)
}

/// Decodes base64url authenticator data.
#[inline]
pub fn parse_authenticator(authenticator_data: &str) -> Result<AuthenticatorData> {
    AuthenticatorData::from_base64(authenticator_data)
}

/// Decodes a registration credential.
///
/// # Errors
///
/// Returns an error if the client data or authenticator data are malformed.
pub fn parse_registration(raw: &RegistrationCredential) -> Result<Registration> {
    Ok(Registration {
        username: raw.username.clone(),
        credential: raw.credential.clone(),
        client: parse_client(&raw.client_data)?,
        authenticator: parse_authenticator(&raw.authenticator_data)?,
        attestation_data: raw.attestation_data.clone(),
    })
}

/// Decodes an authentication credential.
///
/// # Errors
///
/// Returns an error if the client data or authenticator data are malformed.
pub fn parse_authentication(raw: &AuthenticationCredential) -> Result<Authentication> {
    Ok(Authentication {
        credential_id: raw.credential_id.clone(),
        client: parse_client(&raw.client_data)?,
        authenticator: parse_authenticator(&raw.authenticator_data)?,
        signature: raw.signature.clone(),
        user_handle: raw.user_handle.clone(),
    })
}
