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

//! Byte helpers shared by the parsers and verifiers.

use aws_lc_rs::digest::{self, SHA256};
use aws_lc_rs::rand::{SecureRandom, SystemRandom};
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;

use crate::types::{Error, Result};

/// Encodes binary data as base64url (without padding).
#[inline]
pub fn to_base64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decodes a base64url-encoded string.
///
/// Trailing `=` padding is tolerated since some clients emit it.
///
/// # Errors
///
/// Returns an error if the input is not valid base64url.
pub fn parse_base64url(s: &str) -> Result<Vec<u8>> {
    let decoded = if s.ends_with('=') {
        URL_SAFE.decode(s)
    } else {
        URL_SAFE_NO_PAD.decode(s)
    };
    decoded.map_err(|e| Error::malformed("base64url", e))
}

/// Computes the SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = digest::digest(&SHA256, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_ref());
    out
}

/// Returns `a` followed by `b`.
pub fn concatenate_buffers(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// Returns the UTF-8 bytes of `s`.
#[inline]
pub fn to_buffer(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// Generates a cryptographically secure random challenge, base64url-encoded.
///
/// The relying party is responsible for remembering the challenge until the
/// ceremony completes.
pub fn random_challenge() -> String {
    let rng = SystemRandom::new();
    let mut challenge = [0u8; 32];
    rng.fill(&mut challenge)
        .expect("Failed to generate random challenge");
    to_base64url(&challenge)
}
