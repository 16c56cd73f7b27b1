// Copyright 2025 The Entra Postgres Auth Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The access token value type.

use time::OffsetDateTime;

/// An Entra ID access token.
///
/// The token value is an opaque compact string (three dot-separated Base64url
/// segments). It is used immediately, as the derivation source for a username
/// or as a connection password, and discarded; nothing in this crate keeps
/// one around.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// The actual token string, used verbatim as the connection password.
    pub token: String,

    /// The instant at which the token expires.
    ///
    /// Carried through from the credential but not consulted by this crate;
    /// expiry-driven refresh is the credential's concern.
    pub expires_on: OffsetDateTime,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token", &"[censored]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

impl From<azure_core::credentials::AccessToken> for Token {
    fn from(token: azure_core::credentials::AccessToken) -> Self {
        Token {
            token: token.token.secret().to_string(),
            expires_on: token.expires_on,
        }
    }
}
