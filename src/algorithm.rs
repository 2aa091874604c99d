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

//! Supported signature algorithms and public key import.
//!
//! Only RS256 and ES256 are supported. EdDSA is not:
//! browsers cannot return an Ed25519 key through `getPublicKey()` reliably.

use std::fmt;
use std::str::FromStr;

use aws_lc_rs::rsa::PublicEncryptingKey;
use aws_lc_rs::signature::{
    ParsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_FIXED, RSA_PKCS1_2048_8192_SHA256,
};
use serde::{Deserialize, Serialize};

use crate::types::{Error, Result};

/// Signature algorithm of a registered credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Rs256,
    /// ECDSA over P-256 with SHA-256.
    Es256,
}

/// How signatures for an algorithm are transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Used as-is.
    Raw,
    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`, converted to fixed
    /// width before verification.
    Asn1,
}

/// Fixed key-import and verification parameters of an [`Algorithm`].
pub struct AlgorithmParameters {
    /// Key import and verification primitive, which hashes the message with
    /// SHA-256.
    pub verification: &'static dyn VerificationAlgorithm,

    /// Wire encoding of signatures.
    pub signature_encoding: SignatureEncoding,
}

static RS256_PARAMETERS: AlgorithmParameters = AlgorithmParameters {
    verification: &RSA_PKCS1_2048_8192_SHA256,
    signature_encoding: SignatureEncoding::Raw,
};

static ES256_PARAMETERS: AlgorithmParameters = AlgorithmParameters {
    verification: &ECDSA_P256_SHA256_FIXED,
    signature_encoding: SignatureEncoding::Asn1,
};

impl Algorithm {
    /// Returns the JOSE name ("RS256" or "ES256").
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Rs256 => "RS256",
            Algorithm::Es256 => "ES256",
        }
    }

    /// Returns the COSE algorithm identifier.
    pub fn cose_identifier(&self) -> i32 {
        match self {
            Algorithm::Rs256 => -257,
            Algorithm::Es256 => -7,
        }
    }

    /// Returns the fixed parameters for this algorithm.
    pub fn parameters(&self) -> &'static AlgorithmParameters {
        match self {
            Algorithm::Rs256 => &RS256_PARAMETERS,
            Algorithm::Es256 => &ES256_PARAMETERS,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RS256" => Ok(Algorithm::Rs256),
            "ES256" => Ok(Algorithm::Es256),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<i32> for Algorithm {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            -257 => Ok(Algorithm::Rs256),
            -7 => Ok(Algorithm::Es256),
            _ => Err(Error::UnsupportedAlgorithm(value.to_string())),
        }
    }
}

/// A public key imported for signature verification only.
pub struct PublicKey {
    algorithm: Algorithm,
    key: ParsedPublicKey,
}

impl PublicKey {
    /// Imports a DER SubjectPublicKeyInfo for `algorithm`.
    ///
    /// The key is parsed and checked up front: an ES256 key must be a point
    /// on P-256, an RS256 key an RSA key of 2048 to 8192 bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key is malformed, of a different
    /// kind, or rejected by the crypto backend.
    pub fn import(algorithm: Algorithm, spki: &[u8]) -> Result<PublicKey> {
        let params = algorithm.parameters();
        let key = ParsedPublicKey::new(params.verification, spki)
            .map_err(|e| Error::InvalidKey(format!("{} key rejected: {}", algorithm, e)))?;

        // The modulus size is otherwise only checked when verifying
        if algorithm == Algorithm::Rs256 {
            PublicEncryptingKey::from_der(spki)
                .map_err(|e| Error::InvalidKey(format!("{} key rejected: {}", algorithm, e)))?;
        }

        Ok(PublicKey { algorithm, key })
    }

    /// The algorithm this key was imported for.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Verifies `signature` over `message`, hashing with SHA-256.
    ///
    /// The signature must already be in the form the primitive expects
    /// (raw `r || s` for ES256).
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.key.verify_sig(message, signature).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
