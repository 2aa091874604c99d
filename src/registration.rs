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

//! Passkey registration verification.

use crate::client_data::ClientDataType;
use crate::parsers::{parse_registration, Registration, RegistrationCredential};
use crate::types::{ExpectedRegistration, Result};

/// Verifies a registration returned by the client.
///
/// Checks the client data type, origin and challenge. There is no signature
/// to check yet since no public key is on record for this credential.
///
/// # Returns
///
/// The decoded registration. Store `registration.credential` for later
/// authentications.
///
/// # Errors
///
/// Returns an error if:
/// * The payload cannot be decoded
/// * The client data type is not "webauthn.create"
/// * The origin or challenge is rejected
#[tracing::instrument(skip_all, fields(credential_id = %raw.credential.id))]
pub async fn verify_registration(
    raw: &RegistrationCredential,
    expected: &ExpectedRegistration,
) -> Result<Registration> {
    let registration = parse_registration(raw)?;

    registration
        .client
        .verify(ClientDataType::Create, &expected.origin, &expected.challenge)
        .await?;

    tracing::debug!(algorithm = %registration.credential.algorithm, "registration verified");
    Ok(registration)
}
