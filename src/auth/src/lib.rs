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

//! Entra ID (Azure AD) authentication for PostgreSQL connections.
//!
//! [Azure Database for PostgreSQL] accepts an Entra ID access token in place
//! of a password. This crate glues an [Entra ID] credential to a
//! [tokio_postgres::Config]: it derives the database username from the
//! token's claims when the caller did not set one, and it supplies a fresh
//! token as the password for every connection attempt. Tokens are never
//! cached here; caching and refresh belong to the credential implementation
//! ([azure_identity]).
//!
//! ```no_run
//! # use entra_postgres_auth::{credentials, postgres::EntraAuth};
//! # tokio_test::block_on(async {
//! let auth = EntraAuth::new(credentials::Builder::new().build()?);
//!
//! let mut config = tokio_postgres::Config::new();
//! config.host("myserver.postgres.database.azure.com").dbname("mydb");
//! auth.configure(&mut config).await?;
//!
//! let (client, connection) = auth.connect(&config, tokio_postgres::NoTls).await?;
//! tokio::spawn(connection);
//! # Ok::<(), Box<dyn std::error::Error>>(()) });
//! ```
//!
//! The entry points come in an async form ([postgres::EntraAuth]) and a
//! blocking form ([blocking::EntraAuth]) because the connection path that
//! ends up asking for a password may be either.
//!
//! [Azure Database for PostgreSQL]: https://learn.microsoft.com/azure/postgresql/flexible-server/concepts-azure-ad-authentication
//! [Entra ID]: https://learn.microsoft.com/entra/identity/

/// Errors returned when configuring or connecting.
pub mod errors;

/// Errors created during credentials construction.
pub mod build_errors;

/// The token claim decoder: extracts a username from an access token payload.
pub mod claims;

/// Types and functions to work with Entra ID credentials.
pub mod credentials;

/// The access token value type.
pub mod token;

/// Entra authentication for [tokio_postgres] connections.
pub mod postgres;

/// Blocking variants of the configuration entry points.
pub mod blocking;

/// A `Result` alias where the `Err` case is
/// `entra_postgres_auth::errors::CredentialsError`.
pub(crate) type Result<T> = std::result::Result<T, crate::errors::CredentialsError>;
