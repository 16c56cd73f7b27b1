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

//! Errors returned when configuring or connecting.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for [Credentials](crate::credentials::Credentials)
/// operations and for [configure](crate::postgres::EntraAuth::configure).
///
/// This layer performs no retries and no recovery: credential failures are
/// surfaced to the caller with their source preserved, and the only error
/// originated here is the username-claim error, raised to avoid silently
/// configuring a connection without a username.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct CredentialsError(ErrorKind);

impl CredentialsError {
    /// The credential failed to produce an access token (network,
    /// authentication, throttling). The underlying error is available via
    /// [std::error::Error::source].
    pub fn is_acquisition(&self) -> bool {
        matches!(self.0, ErrorKind::Acquisition(_))
    }

    /// A token was obtained, but no recognized username claim could be
    /// extracted from its payload.
    pub fn is_username_claim(&self) -> bool {
        matches!(self.0, ErrorKind::UsernameClaim(_))
    }

    /// The credential could not produce a token.
    pub(crate) fn acquisition<T>(source: T) -> Self
    where
        T: Into<BoxError>,
    {
        CredentialsError(ErrorKind::Acquisition(source.into()))
    }

    /// No username-shaped claim was found in the token payload.
    pub(crate) fn username_claim(detail: &'static str) -> Self {
        CredentialsError(ErrorKind::UsernameClaim(detail))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("cannot fetch an access token from the credential: {0}")]
    Acquisition(#[source] BoxError),
    #[error("could not determine username from token claims: {0}")]
    UsernameClaim(&'static str),
}

/// The error type for [connect](crate::postgres::EntraAuth::connect).
///
/// A connection attempt can fail before the wire is touched (the credential
/// did not produce a token) or inside the driver. The two are kept distinct
/// so callers can tell an authentication problem from a database problem.
#[derive(thiserror::Error, Debug)]
pub enum ConnectionError {
    /// Fetching the token that serves as the connection password failed.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    /// The driver rejected or failed the connection.
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
}
