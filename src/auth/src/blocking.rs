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

//! Blocking counterparts of the connection configuration entry points.
//!
//! Each call builds a single-threaded tokio runtime and drives the async
//! operation to completion on the calling thread. That makes these functions
//! suitable for synchronous applications, and unsuitable inside an async
//! runtime: calling them from an async context panics when the inner
//! runtime starts.

use crate::Result;
use crate::credentials::Credentials;
use crate::errors::CredentialsError;
use tokio_postgres::Config;

/// Attaches Entra ID authentication to PostgreSQL connection configs,
/// blocking the calling thread.
///
/// A thin wrapper over [crate::postgres::EntraAuth]; the semantics of each
/// method are identical to its async counterpart.
#[derive(Clone, Debug)]
pub struct EntraAuth {
    inner: crate::postgres::EntraAuth,
}

impl EntraAuth {
    /// Creates an authenticator from the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: crate::postgres::EntraAuth::new(credentials),
        }
    }

    /// Derives the database username from a token when the config has none.
    ///
    /// See [configure](crate::postgres::EntraAuth::configure).
    pub fn configure(&self, config: &mut Config) -> Result<()> {
        runtime()?.block_on(self.inner.configure(config))
    }

    /// Returns a fresh token to use as the connection password.
    ///
    /// See [password](crate::postgres::EntraAuth::password).
    pub fn password(&self) -> Result<String> {
        runtime()?.block_on(self.inner.password())
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CredentialsError::acquisition)
}
