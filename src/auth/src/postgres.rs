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

//! Entra authentication for [tokio_postgres] connections.
//!
//! [EntraAuth] wires a [Credentials] into a [tokio_postgres::Config]:
//!
//! * [configure](EntraAuth::configure) derives the database username from an
//!   access token when the config has none.
//! * [password](EntraAuth::password) is the password provider: each call
//!   returns a freshly fetched token.
//! * [connect](EntraAuth::connect) applies both and opens the connection.
//!
//! `tokio_postgres::Config` holds a static password rather than a callback,
//! so a token placed there would go stale in minutes. The provider is
//! therefore a method invoked per connection attempt, not a value stored in
//! the config.

use crate::Result;
use crate::claims::{self, UsernameClaim};
use crate::credentials::Credentials;
use crate::errors::{ConnectionError, CredentialsError};
use tokio_postgres::tls::MakeTlsConnect;
use tokio_postgres::{Client, Config, Connection, Socket};

/// Attaches Entra ID authentication to PostgreSQL connection configs.
#[derive(Clone, Debug)]
pub struct EntraAuth {
    credentials: Credentials,
}

impl EntraAuth {
    /// Creates an authenticator from the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Derives the database username from a token when the config has none.
    ///
    /// A config with a username already set is left untouched, and no token
    /// is requested. Otherwise one token is fetched and its `upn`,
    /// `preferred_username`, or `unique_name` claim (in that order) becomes
    /// the username. When no recognized claim is present the operation fails
    /// with a username-claim error instead of leaving the username unset.
    ///
    /// Dropping the returned future aborts the in-flight token request and
    /// leaves the config unmodified; wrap the call in
    /// [tokio::time::timeout] for a deadline.
    pub async fn configure(&self, config: &mut Config) -> Result<()> {
        if config.get_user().is_some() {
            return Ok(());
        }
        let token = self.credentials.token().await?;
        match claims::username_from_token(&token.token) {
            UsernameClaim::Found(username) => {
                tracing::debug!("derived username from token claims");
                config.user(&username);
                Ok(())
            }
            UsernameClaim::NotFound => Err(CredentialsError::username_claim(
                "no recognized username claim in token payload",
            )),
            UsernameClaim::MalformedPayload => Err(CredentialsError::username_claim(
                "token payload is malformed",
            )),
        }
    }

    /// Returns a fresh token to use as the connection password.
    ///
    /// Every call issues an independent token request; nothing is reused
    /// across connection attempts. Claims are not inspected here, so the
    /// only failure mode is an acquisition error.
    pub async fn password(&self) -> Result<String> {
        tracing::debug!("acquiring Entra token for postgres password");
        Ok(self.credentials.token().await?.token)
    }

    /// Opens a connection authenticated with a fresh token.
    ///
    /// Clones the config, derives the username if needed, sets a
    /// just-fetched token as the password, and delegates to
    /// [Config::connect]. The caller's config is not modified; call
    /// [configure](Self::configure) first to persist the derived username.
    pub async fn connect<T>(
        &self,
        config: &Config,
        tls: T,
    ) -> std::result::Result<(Client, Connection<Socket, T::Stream>), ConnectionError>
    where
        T: MakeTlsConnect<Socket>,
    {
        let mut config = config.clone();
        self.configure(&mut config).await?;
        config.password(self.password().await?);
        Ok(config.connect(tls).await?)
    }
}
