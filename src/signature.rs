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

//! Assertion signature verification.
//!
//! See <https://w3c.github.io/webauthn/#sctn-verifying-assertion>. ES256
//! signatures are ASN.1 wrapped, RS256 signatures are not.

use crate::algorithm::{Algorithm, PublicKey, SignatureEncoding};
use crate::types::{Error, Result};
use crate::utils;

/// Width of one P-256 scalar.
const P256_SCALAR_LEN: usize = 32;

const TAG_SEQUENCE: u8 = 0x30;
const TAG_INTEGER: u8 = 0x02;

/// Everything needed to check an assertion signature.
///
/// All byte fields are base64url-encoded, exactly as transmitted.
#[derive(Debug, Clone, Copy)]
pub struct SignatureInput<'a> {
    /// Algorithm of the stored credential.
    pub algorithm: Algorithm,

    /// Stored public key (SubjectPublicKeyInfo).
    pub public_key: &'a str,

    /// Raw authenticator data.
    pub authenticator_data: &'a str,

    /// Raw client data JSON.
    pub client_data: &'a str,

    /// Signature over `authenticator_data || SHA-256(client_data)`.
    pub signature: &'a str,
}

/// Verifies an assertion signature.
///
/// Returns `Ok(false)` when the signature simply does not match; turning that
/// into a rejection is up to the caller.
///
/// # Errors
///
/// Returns an error if the key cannot be imported or any field cannot be
/// decoded.
pub fn verify_signature(input: &SignatureInput<'_>) -> Result<bool> {
    let key_bytes = utils::parse_base64url(input.public_key)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    let key = PublicKey::import(input.algorithm, &key_bytes)?;

    let authenticator_data = utils::parse_base64url(input.authenticator_data)?;
    let client_data = utils::parse_base64url(input.client_data)?;
    let client_hash = utils::sha256(&client_data);
    let signed_data = utils::concatenate_buffers(&authenticator_data, &client_hash);

    let mut signature = utils::parse_base64url(input.signature)
        .map_err(|e| Error::MalformedSignature(e.to_string()))?;
    if input.algorithm.parameters().signature_encoding == SignatureEncoding::Asn1 {
        signature = asn1_to_raw(&signature)?.to_vec();
    }

    let valid = key.verify(&signed_data, &signature);
    tracing::trace!(algorithm = %input.algorithm, valid, "signature checked");
    Ok(valid)
}

/// Converts a DER ECDSA P-256 signature into raw `r || s` form.
///
/// Each INTEGER carries at most 32 significant bytes. A single zero byte may
/// precede them only when the high bit is set. Shorter integers are
/// left-padded with zeros. This relies on the fixed
/// P-256 scalar width and must not be used for other curves.
///
/// # Errors
///
/// Returns [`Error::MalformedSignature`] on a wrong tag, inconsistent length,
/// needless zero pad or an integer wider than 32 bytes.
pub fn asn1_to_raw(signature: &[u8]) -> Result<[u8; 2 * P256_SCALAR_LEN]> {
    let body = match signature {
        [TAG_SEQUENCE, len, body @ ..] if usize::from(*len) == body.len() => body,
        [TAG_SEQUENCE, ..] => return Err(malformed("sequence length mismatch")),
        _ => return Err(malformed("expected a DER sequence")),
    };

    let mut raw = [0u8; 2 * P256_SCALAR_LEN];
    let (r, rest) = read_scalar(body)?;
    let (s, rest) = read_scalar(rest)?;
    if !rest.is_empty() {
        return Err(malformed("trailing bytes after s"));
    }

    raw[P256_SCALAR_LEN - r.len()..P256_SCALAR_LEN].copy_from_slice(r);
    raw[2 * P256_SCALAR_LEN - s.len()..].copy_from_slice(s);
    Ok(raw)
}

/// Reads one INTEGER and returns its significant bytes and the remainder.
fn read_scalar(data: &[u8]) -> Result<(&[u8], &[u8])> {
    let (len, rest) = match data {
        [TAG_INTEGER, len, rest @ ..] => (usize::from(*len), rest),
        [_, ..] => return Err(malformed("expected an INTEGER")),
        [] => return Err(malformed("missing INTEGER")),
    };
    if len == 0 || len > rest.len() {
        return Err(malformed("truncated INTEGER"));
    }

    let (mut value, rest) = rest.split_at(len);
    if value.len() == P256_SCALAR_LEN + 1 {
        // A zero pad is only allowed in front of a set high bit
        if value[0] != 0 || value[1] & 0x80 == 0 {
            return Err(malformed("INTEGER is not minimally encoded"));
        }
        value = &value[1..];
    }
    if value.len() > P256_SCALAR_LEN {
        return Err(malformed("INTEGER wider than 32 bytes"));
    }
    Ok((value, rest))
}

fn malformed(msg: &str) -> Error {
    Error::MalformedSignature(msg.to_string())
}
