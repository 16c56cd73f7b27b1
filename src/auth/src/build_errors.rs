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

//! Errors created during credentials construction.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for the [Credentials] builder.
///
/// Applications rarely need to create instances of this error type. The
/// exception might be when testing application code, where the application is
/// mocking this library's behavior.
///
/// [Credentials]: crate::credentials::Credentials
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// A problem constructing the default platform credential.
    pub fn is_credential(&self) -> bool {
        matches!(self.0, ErrorKind::Credential(_))
    }

    /// The token scope was set to an empty string.
    pub fn is_missing_scope(&self) -> bool {
        matches!(self.0, ErrorKind::MissingScope)
    }

    /// Create an error representing a failure to construct the default
    /// platform credential.
    pub(crate) fn credential<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Credential(source.into()))
    }

    /// The token scope is missing.
    pub(crate) fn missing_scope() -> Error {
        Error(ErrorKind::MissingScope)
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("cannot create the default platform credential: {0}")]
    Credential(#[source] BoxError),
    #[error("a token scope must be provided")]
    MissingScope,
}
