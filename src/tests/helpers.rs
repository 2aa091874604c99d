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

use crate::*;
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::rsa::KeySize;
use aws_lc_rs::signature::{
    EcdsaKeyPair, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING, RSA_PKCS1_SHA256,
};

pub const ORIGIN: &str = "https://example.com";
pub const CHALLENGE: &str = "abc123";
pub const CREDENTIAL_ID: &str = "Y3JlZGVudGlhbC1pZA";

/// Flags byte with UP and UV set.
pub const FLAGS_UP_UV: u8 = 0x05;

/// DER prefix of a P-256 SubjectPublicKeyInfo, followed by the 65-byte point.
const P256_SPKI_PREFIX: [u8; 26] = [
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
    0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];

/// DER AlgorithmIdentifier for rsaEncryption with NULL parameters.
const RSA_ALGORITHM_IDENTIFIER: [u8; 15] = [
    0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, 0x05, 0x00,
];

enum Signer {
    Ecdsa(EcdsaKeyPair),
    Rsa(RsaKeyPair),
}

/// A freshly generated key pair whose public half is in SPKI form.
pub struct TestKey {
    pub algorithm: Algorithm,
    pub spki: Vec<u8>,
    signer: Signer,
}

impl TestKey {
    pub fn es256() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng).unwrap();
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref()).unwrap();

        let mut spki = P256_SPKI_PREFIX.to_vec();
        spki.extend_from_slice(key_pair.public_key().as_ref());

        Self {
            algorithm: Algorithm::Es256,
            spki,
            signer: Signer::Ecdsa(key_pair),
        }
    }

    pub fn rs256() -> Self {
        let key_pair = RsaKeyPair::generate(KeySize::Rsa2048).unwrap();

        // public_key() is a PKCS#1 RSAPublicKey
        let spki = rsa_spki(key_pair.public_key().as_ref());

        Self {
            algorithm: Algorithm::Rs256,
            spki,
            signer: Signer::Rsa(key_pair),
        }
    }

    pub fn public_key(&self) -> String {
        to_base64url(&self.spki)
    }

    pub fn credential(&self) -> CredentialKey {
        CredentialKey {
            id: CREDENTIAL_ID.to_string(),
            public_key: self.public_key(),
            algorithm: self.algorithm,
        }
    }

    /// Signs `message` the way an authenticator does (DER for ECDSA).
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let rng = SystemRandom::new();
        match &self.signer {
            Signer::Ecdsa(key_pair) => key_pair.sign(&rng, message).unwrap().as_ref().to_vec(),
            Signer::Rsa(key_pair) => {
                let mut signature = vec![0u8; key_pair.public_modulus_len()];
                key_pair
                    .sign(&RSA_PKCS1_SHA256, &rng, message, &mut signature)
                    .unwrap();
                signature
            }
        }
    }
}

/// Encodes one DER element.
pub fn der(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xff {
        out.extend_from_slice(&[0x81, len as u8]);
    } else {
        out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
    }
    out.extend_from_slice(content);
    out
}

/// Wraps a PKCS#1 RSAPublicKey in a SubjectPublicKeyInfo.
pub fn rsa_spki(rsa_public_key: &[u8]) -> Vec<u8> {
    let mut bit_string = vec![0x00];
    bit_string.extend_from_slice(rsa_public_key);
    let mut content = RSA_ALGORITHM_IDENTIFIER.to_vec();
    content.extend_from_slice(&der(0x03, &bit_string));
    der(0x30, &content)
}

/// SPKI of a 1024-bit RSA key with exponent 65537.
pub fn rsa_1024_spki() -> Vec<u8> {
    let mut modulus = vec![0x00, 0xC3]; // zero pad, then the top bit set
    modulus.extend_from_slice(&[0xA5; 126]);
    modulus.push(0x0B); // odd
    let mut rsa_public_key = der(0x02, &modulus);
    rsa_public_key.extend_from_slice(&der(0x02, &[0x01, 0x00, 0x01]));
    rsa_spki(&der(0x30, &rsa_public_key))
}

/// DER-encodes an ECDSA signature the way a standard encoder does: minimal
/// integers, with a zero byte in front of a set high bit.
pub fn der_signature(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    fn integer(value: &[u8]) -> Vec<u8> {
        let first = value.iter().position(|&b| b != 0).unwrap_or(value.len() - 1);
        let mut content = Vec::new();
        if value[first] & 0x80 != 0 {
            content.push(0x00);
        }
        content.extend_from_slice(&value[first..]);
        der(0x02, &content)
    }

    let mut body = integer(r);
    body.extend_from_slice(&integer(s));
    der(0x30, &body)
}

/// Builds authenticator data for `rp_id` without attested credential data.
pub fn authenticator_data(rp_id: &str, flags: u8, counter: u32) -> Vec<u8> {
    let mut auth_data = sha256(rp_id.as_bytes()).to_vec(); // rpIdHash
    auth_data.push(flags);
    auth_data.extend_from_slice(&counter.to_be_bytes()); // counter
    auth_data
}

/// Builds client data JSON bytes.
pub fn client_data_json(type_: &str, challenge: &str, origin: &str) -> Vec<u8> {
    let client_data = serde_json::json!({
        "type": type_,
        "challenge": challenge,
        "origin": origin,
        "crossOrigin": false
    });
    serde_json::to_vec(&client_data).unwrap()
}

/// Builds a signed authentication credential as a browser would send it.
pub fn assertion(key: &TestKey, authenticator_data: &[u8], client_data: &[u8]) -> AuthenticationCredential {
    let signed_data = concatenate_buffers(authenticator_data, &sha256(client_data));
    let signature = key.sign(&signed_data);

    AuthenticationCredential {
        credential_id: CREDENTIAL_ID.to_string(),
        authenticator_data: to_base64url(authenticator_data),
        client_data: to_base64url(client_data),
        signature: to_base64url(&signature),
        user_handle: None,
    }
}

/// Builds a registration credential for `key`.
pub fn registration(key: &TestKey, type_: &str, challenge: &str, origin: &str) -> RegistrationCredential {
    let mut auth_data = authenticator_data("example.com", 0x45, 0); // UP, UV, AT
    auth_data.extend_from_slice(&[0x11; 16]); // aaguid
    auth_data.extend_from_slice(&[0, 16]); // credIdLen
    auth_data.extend_from_slice(&[0x22; 16]); // credId

    RegistrationCredential {
        username: "alice@example.com".to_string(),
        credential: key.credential(),
        authenticator_data: to_base64url(&auth_data),
        client_data: to_base64url(&client_data_json(type_, challenge, origin)),
        attestation_data: None,
    }
}

pub fn expected_authentication(user_verified: bool, counter: u32) -> ExpectedAuthentication {
    ExpectedAuthentication {
        origin: Validator::exact(ORIGIN),
        challenge: Validator::exact(CHALLENGE),
        user_verified,
        counter,
    }
}
