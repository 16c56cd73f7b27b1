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

//! The token claim decoder.
//!
//! Entra ID access tokens are compact tokens: three dot-separated Base64url
//! segments (header, payload, signature). The payload is a JSON document of
//! claims, and for Azure Database for PostgreSQL the database username is one
//! of them. This module extracts it. Nothing here validates the token; the
//! database server does that.

use base64::prelude::{BASE64_URL_SAFE, Engine as _};
use serde::Deserialize;
use std::borrow::Cow;

/// The result of searching a token payload for a username claim.
///
/// The decoder never fails: every malformed input maps to one of the
/// non-`Found` variants. Callers that require a username treat both of them
/// as "no username available".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsernameClaim {
    /// The value of the first recognized username claim.
    Found(String),
    /// The token does not have the three-segment compact shape, or its
    /// payload contains none of the recognized claims.
    NotFound,
    /// The payload segment is not valid Base64url, UTF-8, or JSON, or a
    /// recognized claim holds a non-string value.
    MalformedPayload,
}

/// The claims consulted for a username, in priority order.
#[derive(Deserialize)]
struct Claims {
    upn: Option<String>,
    preferred_username: Option<String>,
    unique_name: Option<String>,
}

impl Claims {
    fn username(self) -> Option<String> {
        self.upn.or(self.preferred_username).or(self.unique_name)
    }
}

/// Extracts a username from the claims of a compact access token.
///
/// Looks up `upn`, then `preferred_username`, then `unique_name`, and returns
/// the first one present. Pure function of its input.
pub fn username_from_token(token: &str) -> UsernameClaim {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return UsernameClaim::NotFound;
    }

    // The payload is the second segment, Base64url encoded without padding.
    let payload = restore_padding(segments[1]);
    let Ok(decoded) = BASE64_URL_SAFE.decode(payload.as_bytes()) else {
        return UsernameClaim::MalformedPayload;
    };
    let Ok(claims) = serde_json::from_slice::<Claims>(&decoded) else {
        return UsernameClaim::MalformedPayload;
    };
    match claims.username() {
        Some(username) => UsernameClaim::Found(username),
        None => UsernameClaim::NotFound,
    }
}

/// Restores the `=` padding stripped from a Base64url segment.
fn restore_padding(segment: &str) -> Cow<'_, str> {
    match segment.len() % 4 {
        2 => Cow::Owned(format!("{segment}==")),
        3 => Cow::Owned(format!("{segment}=")),
        _ => Cow::Borrowed(segment),
    }
}
