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

//! Data structures and error types for WebAuthn/Passkey verification.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::validator::Validator;

// Error handling

/// Boxed error returned by validator predicates.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Convenience type alias for Results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Client data field checked by a [`Validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    /// The origin observed by the client.
    Origin,
    /// The challenge echoed back by the client.
    Challenge,
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContextField::Origin => f.write_str("origin"),
            ContextField::Challenge => f.write_str("challenge"),
        }
    }
}

/// Authenticator flag that a ceremony requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyFlag {
    /// User presence (UP).
    UserPresent,
    /// User verification (UV).
    UserVerified,
}

impl fmt::Display for CeremonyFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CeremonyFlag::UserPresent => f.write_str("userPresent"),
            CeremonyFlag::UserVerified => f.write_str("userVerified"),
        }
    }
}

/// Broad category of a verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The payload could not be decoded into the expected structure.
    MalformedInput,
    /// The client data type does not match the ceremony.
    ProtocolMismatch,
    /// Origin or challenge was rejected by its validator.
    ContextMismatch,
    /// Credential id or relying party id hash does not match.
    IdentityMismatch,
    /// A required authenticator flag is missing.
    CeremonyIncomplete,
    /// The signature counter did not increase.
    ReplaySuspected,
    /// The signature, or the key or signature bytes, did not check out.
    SignatureInvalid,
    /// The algorithm identifier is not RS256 or ES256.
    UnsupportedAlgorithm,
}

/// Error type for Passki verification.
///
/// Every check is fail-fast, so an error always names the first field that
/// was rejected together with the observed value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw input could not be decoded.
    #[error("Malformed {what}: {reason}")]
    MalformedInput {
        /// Which part of the payload was being decoded.
        what: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// The client data `type` is not the one the ceremony expects.
    #[error("Unexpected ClientData type: {observed}")]
    UnexpectedType {
        /// Expected ceremony type.
        expected: &'static str,
        /// Type found in client data.
        observed: String,
    },

    /// Origin or challenge did not satisfy its validator.
    #[error("Unexpected ClientData {field}: {observed}")]
    UnexpectedContext {
        /// Rejected field.
        field: ContextField,
        /// Value found in client data.
        observed: String,
    },

    /// A validator predicate itself failed.
    #[error("Validator for ClientData {field} failed: {source}")]
    Validator {
        /// Field under validation.
        field: ContextField,
        /// Error raised by the predicate.
        #[source]
        source: BoxError,
    },

    /// The credential id presented does not belong to the stored credential.
    #[error("Credential ID mismatch: {observed} vs {expected}")]
    CredentialMismatch {
        /// Credential id sent by the client.
        observed: String,
        /// Credential id of the stored credential.
        expected: String,
    },

    /// The relying party id hash in authenticator data is not ours.
    #[error("Unexpected RpIdHash: {observed} vs {expected}")]
    RpIdHashMismatch {
        /// Hash found in authenticator data (base64url).
        observed: String,
        /// Hash of the origin's hostname (base64url).
        expected: String,
    },

    /// A required user presence or verification flag is missing.
    #[error("Unexpected authenticator flags: missing {0}")]
    MissingFlag(CeremonyFlag),

    /// Counter did not strictly increase.
    #[error("Unexpected authenticator counter: {observed} (should be > {last})")]
    CounterNotIncreased {
        /// Counter found in authenticator data.
        observed: u32,
        /// Last counter known for the credential.
        last: u32,
    },

    /// Signature verification returned false.
    #[error("Invalid signature: {signature}")]
    InvalidSignature {
        /// The signature as transmitted (base64url).
        signature: String,
    },

    /// The signature bytes could not be decoded.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// The stored public key could not be imported.
    #[error("Invalid public key: {0}")]
    InvalidKey(String),

    /// Algorithm outside the supported set.
    #[error("Unknown or unsupported crypto algorithm: {0}. Only 'RS256' and 'ES256' are supported.")]
    UnsupportedAlgorithm(String),
}

impl Error {
    pub(crate) fn malformed(what: &'static str, reason: impl fmt::Display) -> Self {
        Error::MalformedInput {
            what,
            reason: reason.to_string(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::MalformedInput,
            Error::UnexpectedType { .. } => ErrorKind::ProtocolMismatch,
            Error::UnexpectedContext { .. } | Error::Validator { .. } => {
                ErrorKind::ContextMismatch
            }
            Error::CredentialMismatch { .. } | Error::RpIdHashMismatch { .. } => {
                ErrorKind::IdentityMismatch
            }
            Error::MissingFlag(_) => ErrorKind::CeremonyIncomplete,
            Error::CounterNotIncreased { .. } => ErrorKind::ReplaySuspected,
            Error::InvalidSignature { .. }
            | Error::MalformedSignature(_)
            | Error::InvalidKey(_) => ErrorKind::SignatureInvalid,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
        }
    }
}

/// User verification requirement for passkey operations.
///
/// Specifies whether user verification (e.g., PIN, biometric) is required
/// during the authentication ceremony.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserVerificationRequirement {
    /// User verification is required.
    Required,
    /// User verification is preferred but not required.
    #[default]
    Preferred,
    /// User verification should not be performed.
    Discouraged,
}

/// A credential public key as registered by the client.
///
/// This is the credential the relying party stores after registration and
/// hands back on every authentication.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialKey {
    /// The credential identifier (base64url-encoded).
    pub id: String,

    /// The public key in SubjectPublicKeyInfo form (base64url-encoded).
    pub public_key: String,

    /// The signing algorithm of the key.
    pub algorithm: Algorithm,
}

/// Values a registration is checked against.
#[derive(Clone, Debug)]
pub struct ExpectedRegistration {
    /// Accepted client origin.
    pub origin: Validator,

    /// Accepted challenge (base64url-encoded).
    pub challenge: Validator,
}

/// Values an authentication is checked against.
#[derive(Clone, Debug)]
pub struct ExpectedAuthentication {
    /// Accepted client origin.
    pub origin: Validator,

    /// Accepted challenge (base64url-encoded).
    pub challenge: Validator,

    /// Whether the authenticator must report user verification.
    pub user_verified: bool,

    /// Last signature counter stored for the credential.
    pub counter: u32,
}
