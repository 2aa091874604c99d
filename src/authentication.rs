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

//! Passkey authentication verification.

use url::Url;

use crate::client_data::ClientDataType;
use crate::parsers::{parse_authentication, Authentication, AuthenticationCredential};
use crate::signature::{verify_signature, SignatureInput};
use crate::types::{CeremonyFlag, CredentialKey, Error, ExpectedAuthentication, Result};
use crate::utils;

/// Verifies an authentication returned by the client.
///
/// # Arguments
///
/// * `raw` - The credential data returned by the client
/// * `credential` - The stored credential the client claims to use
/// * `expected` - Expected origin, challenge, user verification and last counter
///
/// # Returns
///
/// The decoded authentication. Persist `authentication.authenticator.counter`
/// on the stored credential to detect replays next time.
///
/// # Errors
///
/// Returns an error if:
/// * The credential id does not match the stored credential
/// * The signature is invalid
/// * The client data type is not "webauthn.get"
/// * The origin or challenge is rejected
/// * The rpIdHash is not the hash of the origin's hostname
/// * User presence, or required user verification, is missing
/// * The counter hasn't increased (possible replay attack)
#[tracing::instrument(
    skip_all,
    fields(credential_id = %credential.id, algorithm = %credential.algorithm)
)]
pub async fn verify_authentication(
    raw: &AuthenticationCredential,
    credential: &CredentialKey,
    expected: &ExpectedAuthentication,
) -> Result<Authentication> {
    if raw.credential_id != credential.id {
        tracing::debug!(observed = %raw.credential_id, "credential id rejected");
        return Err(Error::CredentialMismatch {
            observed: raw.credential_id.clone(),
            expected: credential.id.clone(),
        });
    }

    let valid = verify_signature(&SignatureInput {
        algorithm: credential.algorithm,
        public_key: &credential.public_key,
        authenticator_data: &raw.authenticator_data,
        client_data: &raw.client_data,
        signature: &raw.signature,
    })?;
    if !valid {
        tracing::debug!("signature rejected");
        return Err(Error::InvalidSignature {
            signature: raw.signature.clone(),
        });
    }

    let authentication = parse_authentication(raw)?;

    authentication
        .client
        .verify(ClientDataType::Get, &expected.origin, &expected.challenge)
        .await?;

    // The relying party id is taken to be the hostname of the origin the
    // client reported, so `rp.id` and `rp.origin` must agree.
    let expected_rp_id_hash = rp_id_hash(&authentication.client.origin)?;
    let authenticator = &authentication.authenticator;
    if authenticator.rp_id_hash != expected_rp_id_hash {
        tracing::debug!(observed = %authenticator.rp_id_hash, "rpIdHash rejected");
        return Err(Error::RpIdHashMismatch {
            observed: authenticator.rp_id_hash.clone(),
            expected: expected_rp_id_hash,
        });
    }

    if !authenticator.flags.user_present() {
        tracing::debug!("user presence missing");
        return Err(Error::MissingFlag(CeremonyFlag::UserPresent));
    }
    if expected.user_verified && !authenticator.flags.user_verified() {
        tracing::debug!("user verification missing");
        return Err(Error::MissingFlag(CeremonyFlag::UserVerified));
    }

    if authenticator.counter <= expected.counter {
        tracing::debug!(observed = authenticator.counter, last = expected.counter, "counter rejected");
        return Err(Error::CounterNotIncreased {
            observed: authenticator.counter,
            last: expected.counter,
        });
    }

    tracing::debug!(counter = authenticator.counter, "authentication verified");
    Ok(authentication)
}

/// Returns base64url(SHA-256(hostname of `origin`)).
///
/// # Errors
///
/// Returns an error if `origin` is not a URL with a host.
pub fn rp_id_hash(origin: &str) -> Result<String> {
    let url = Url::parse(origin).map_err(|e| Error::malformed("origin", e))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::malformed("origin", "origin has no host"))?;
    Ok(utils::to_base64url(&utils::sha256(&utils::to_buffer(host))))
}
