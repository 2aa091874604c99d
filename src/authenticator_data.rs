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

//! Authenticator data parsing.

use bitflags::bitflags;
use uuid::Uuid;

use crate::types::{Error, Result};
use crate::utils;

/// Length of rpIdHash, flags and counter.
const MIN_LENGTH: usize = 37;

/// Length up to and including the AAGUID of attested credential data.
const AAGUID_END: usize = 53;

bitflags! {
    /// Flags for authenticator data.
    ///
    /// <https://w3c.github.io/webauthn/#authdata-flags>
    #[repr(transparent)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct Flags: u8 {
        /// User Present, bit 0
        const UP = 1 << 0;
        /// User Verified, bit 2
        const UV = 1 << 2;
        /// Backup Eligibility, bit 3
        const BE = 1 << 3;
        /// Backup State, bit 4
        const BS = 1 << 4;
        /// Attested Credential Data, bit 6
        const AT = 1 << 6;
        /// Extension Data Included, bit 7
        const ED = 1 << 7;
    }
}

impl Flags {
    /// Whether the user presence test succeeded.
    pub fn user_present(&self) -> bool {
        self.contains(Flags::UP)
    }

    /// Whether the user was verified (PIN, biometric, ...).
    pub fn user_verified(&self) -> bool {
        self.contains(Flags::UV)
    }

    /// Whether the credential may be backed up.
    pub fn backup_eligible(&self) -> bool {
        self.contains(Flags::BE)
    }

    /// Whether the credential is currently backed up.
    pub fn backed_up(&self) -> bool {
        self.contains(Flags::BS)
    }

    /// Whether attested credential data follows the counter.
    pub fn attested_data(&self) -> bool {
        self.contains(Flags::AT)
    }

    /// Whether extension data is included.
    pub fn extensions_included(&self) -> bool {
        self.contains(Flags::ED)
    }
}

/// Parsed authenticator data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorData {
    /// SHA-256 of the relying party id (base64url-encoded).
    pub rp_id_hash: String,

    /// Flag bits; reserved bits are kept as-is.
    pub flags: Flags,

    /// Signature counter.
    pub counter: u32,

    /// Authenticator model identifier, present when attested credential
    /// data is included.
    pub aaguid: Option<Uuid>,
}

impl AuthenticatorData {
    /// Parses raw authenticator data bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 37 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<AuthenticatorData> {
        if bytes.len() < MIN_LENGTH {
            return Err(Error::malformed(
                "authenticator data",
                format!("expected at least {} bytes, got {}", MIN_LENGTH, bytes.len()),
            ));
        }

        let flags = Flags::from_bits_retain(bytes[32]);
        let counter = u32::from_be_bytes([bytes[33], bytes[34], bytes[35], bytes[36]]);

        let aaguid = if flags.attested_data() && bytes.len() >= AAGUID_END {
            Uuid::from_slice(&bytes[MIN_LENGTH..AAGUID_END]).ok()
        } else {
            None
        };

        Ok(AuthenticatorData {
            rp_id_hash: utils::to_base64url(&bytes[..32]),
            flags,
            counter,
            aaguid,
        })
    }

    /// Parses base64url-encoded authenticator data.
    #[inline]
    pub fn from_base64(authenticator_data: &str) -> Result<AuthenticatorData> {
        let bytes = utils::parse_base64url(authenticator_data)?;
        Self::from_bytes(&bytes)
    }
}
