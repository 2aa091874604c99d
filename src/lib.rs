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

//! Passki RP - relying party verification for WebAuthn/Passkeys
//!
//! This crate checks what a browser returns from `navigator.credentials.create()`
//! and `navigator.credentials.get()`. It is stateless: challenges, stored
//! credentials and counters are kept by the caller and passed in.
//!
//! # Features
//!
//! - RS256 (RSA PKCS#1 v1.5) and ES256 (ECDSA P-256) signatures
//! - Origin and challenge checks against literals or async predicates
//! - Relying party id hash, user presence and user verification checks
//! - Replay detection via strictly increasing signature counters
//!
//! # Example
//!
//! ```rust
//! use passki_rp::{RelyingParty, UserVerificationRequirement};
//!
//! let rp = RelyingParty::new("https://example.com")
//!     .with_user_verification(UserVerificationRequirement::Required);
//!
//! // Registration flow
//! // Step 1: Issue a challenge and remember it
//! let challenge = passki_rp::random_challenge();
//!
//! // Step 2: Verify what the client sent back
//! # /*
//! let registration = passki_rp::verify_registration(
//!     &registration_credential,        // Credential from client
//!     &rp.registration(&challenge),    // Expected origin and challenge
//! ).await?;
//! # */
//!
//! // Save registration.credential to your database with a counter of 0
//!
//! // Authentication flow
//! # /*
//! let authentication = passki_rp::verify_authentication(
//!     &authentication_credential,                         // Credential from client
//!     &stored.credential,                                 // Credential from database
//!     &rp.authentication(&challenge, stored.counter),     // Expected values
//! ).await?;
//!
//! // Update the counter in your database to prevent replay attacks
//! stored.counter = authentication.authenticator.counter;
//! # */
//! # let _ = (rp, challenge);
//! ```
//!
//! # Security Considerations
//!
//! - The relying party id hash is checked against the hostname of the origin
//!   the client reported, so the origin validator must only accept your own
//!   origins
//! - Store and check signature counters to detect cloned authenticators
//! - Use a fresh challenge for every ceremony and discard it afterwards

mod algorithm;
mod authentication;
mod authenticator_data;
mod client_data;
mod config;
mod parsers;
mod registration;
mod signature;
mod types;
mod utils;
mod validator;

#[cfg(test)]
mod tests;

// Re-export public types
pub use algorithm::{Algorithm, AlgorithmParameters, PublicKey, SignatureEncoding};
pub use authentication::{rp_id_hash, verify_authentication};
pub use authenticator_data::{AuthenticatorData, Flags};
pub use client_data::{ClientData, ClientDataType};
pub use config::RelyingParty;
pub use parsers::{
    parse_authentication, parse_authenticator, parse_client, parse_registration, Authentication,
    AuthenticationCredential, Registration, RegistrationCredential,
};
pub use registration::verify_registration;
pub use signature::{asn1_to_raw, verify_signature, SignatureInput};
pub use types::*;
pub use utils::{
    concatenate_buffers, parse_base64url, random_challenge, sha256, to_base64url, to_buffer,
};
pub use validator::Validator;
