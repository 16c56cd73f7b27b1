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

//! Types and functions to work with Entra ID credentials.
//!
//! A [Credentials] is an [azure_core::credentials::TokenCredential] bound to
//! the token scope of the target database service. Any credential type from
//! [azure_identity] works: managed identity for workloads running in Azure,
//! workload identity on AKS, or the developer tools chain (`az login`,
//! `azd auth login`, Azure PowerShell) on a workstation. When no credential
//! is supplied the developer tools chain is used.
//!
//! Tokens are requested one at a time and never cached here. Credential
//! implementations are free to cache internally; whether two requests hit
//! the identity service or a local cache is their business.

use crate::Result;
use crate::build_errors::Error as BuilderError;
use crate::errors::CredentialsError;
use crate::token::Token;
use azure_core::credentials::TokenCredential;
use azure_identity::DeveloperToolsCredential;
use std::sync::Arc;

/// The OAuth2 scope identifying the Azure Database for PostgreSQL service.
///
/// This is the default scope for every token request this crate makes. It is
/// the right value for both single-server and flexible-server deployments;
/// sovereign clouds use a different resource and override it with
/// [Builder::with_scope].
pub const AZURE_POSTGRES_SCOPE: &str = "https://ossrdbms-aad.database.windows.net/.default";

/// An access token producer bound to a database scope.
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn TokenCredential>,
    scope: String,
}

impl Credentials {
    /// Fetches a new access token.
    ///
    /// Every call performs an independent `get_token` round trip; this layer
    /// never reuses a previously returned token. Dropping the returned
    /// future aborts the in-flight request.
    pub async fn token(&self) -> Result<Token> {
        tracing::debug!(scope = %self.scope, "acquiring Entra ID access token");
        let token = self
            .inner
            .get_token(&[&self.scope], None)
            .await
            .map_err(CredentialsError::acquisition)?;
        Ok(Token::from(token))
    }

    /// The scope used for every token request.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

/// A builder for [Credentials].
///
/// # Example
/// ```no_run
/// # use entra_postgres_auth::credentials::Builder;
/// # tokio_test::block_on(async {
/// let credentials = Builder::new().build()?;
/// let token = credentials.token().await?;
/// # Ok::<(), Box<dyn std::error::Error>>(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    credential: Option<Arc<dyn TokenCredential>>,
    scope: String,
}

impl Builder {
    /// Creates a new builder using the default database scope.
    pub fn new() -> Self {
        Self {
            credential: None,
            scope: AZURE_POSTGRES_SCOPE.to_string(),
        }
    }

    /// Sets the credential used to fetch tokens.
    ///
    /// Production deployments in Azure should pass a managed identity or
    /// workload identity credential here instead of relying on the developer
    /// tools default.
    ///
    /// # Example
    /// ```no_run
    /// # use entra_postgres_auth::credentials::Builder;
    /// use azure_identity::ManagedIdentityCredential;
    ///
    /// let credential = ManagedIdentityCredential::new(None)?;
    /// let credentials = Builder::new().with_credential(credential).build()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn with_credential(mut self, credential: Arc<dyn TokenCredential>) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Overrides the token scope.
    pub fn with_scope<T: Into<String>>(mut self, scope: T) -> Self {
        self.scope = scope.into();
        self
    }

    /// Returns a [Credentials] instance with the configured settings.
    ///
    /// When no credential was supplied, builds the
    /// [DeveloperToolsCredential] chain.
    pub fn build(self) -> std::result::Result<Credentials, BuilderError> {
        if self.scope.is_empty() {
            return Err(BuilderError::missing_scope());
        }
        let inner = match self.credential {
            Some(credential) => credential,
            None => {
                DeveloperToolsCredential::new(None).map_err(BuilderError::credential)?
                    as Arc<dyn TokenCredential>
            }
        };
        Ok(Credentials {
            inner,
            scope: self.scope,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use azure_core::credentials::{AccessToken, Secret, TokenRequestOptions};
    use azure_core::error::ErrorKind;
    use std::sync::Mutex;
    use time::{Duration, OffsetDateTime};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    /// A credential returning a fixed token and counting its invocations.
    /// Used by tests in other modules.
    #[derive(Debug)]
    pub(crate) struct FakeCredential {
        token: String,
        calls: Mutex<usize>,
        scopes: Mutex<Vec<String>>,
    }

    impl FakeCredential {
        pub(crate) fn new<T: Into<String>>(token: T) -> Arc<Self> {
            Arc::new(Self {
                token: token.into(),
                calls: Mutex::new(0),
                scopes: Mutex::new(Vec::new()),
            })
        }

        /// How many token requests this credential has served.
        pub(crate) fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        /// The scopes passed in the most recent token request.
        pub(crate) fn last_scopes(&self) -> Vec<String> {
            self.scopes.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl TokenCredential for FakeCredential {
        async fn get_token(
            &self,
            scopes: &[&str],
            _options: Option<TokenRequestOptions<'_>>,
        ) -> azure_core::Result<AccessToken> {
            *self.calls.lock().unwrap() += 1;
            *self.scopes.lock().unwrap() = scopes.iter().map(|s| s.to_string()).collect();
            Ok(AccessToken::new(
                Secret::new(self.token.clone()),
                OffsetDateTime::now_utc() + Duration::hours(1),
            ))
        }
    }

    /// A credential whose every token request fails.
    /// Used by tests in other modules.
    #[derive(Debug)]
    pub(crate) struct FailingCredential;

    #[async_trait::async_trait]
    impl TokenCredential for FailingCredential {
        async fn get_token(
            &self,
            _scopes: &[&str],
            _options: Option<TokenRequestOptions<'_>>,
        ) -> azure_core::Result<AccessToken> {
            Err(azure_core::Error::with_message(
                ErrorKind::Credential,
                "test-only-credential-failure",
            ))
        }
    }

    #[tokio::test]
    async fn fetches_token_with_default_scope() -> TestResult {
        let fake = FakeCredential::new("test-token-123");
        let credentials = Builder::new().with_credential(fake.clone()).build()?;

        let token = credentials.token().await?;
        assert_eq!(token.token, "test-token-123");
        assert_eq!(fake.last_scopes(), vec![AZURE_POSTGRES_SCOPE.to_string()]);
        assert_eq!(credentials.scope(), AZURE_POSTGRES_SCOPE);
        Ok(())
    }

    #[tokio::test]
    async fn scope_override() -> TestResult {
        let fake = FakeCredential::new("test-token-123");
        let credentials = Builder::new()
            .with_credential(fake.clone())
            .with_scope("https://custom.scope/.default")
            .build()?;

        credentials.token().await?;
        assert_eq!(
            fake.last_scopes(),
            vec!["https://custom.scope/.default".to_string()]
        );
        Ok(())
    }

    #[tokio::test]
    async fn no_caching_between_requests() -> TestResult {
        let fake = FakeCredential::new("test-token-123");
        let credentials = Builder::new().with_credential(fake.clone()).build()?;

        credentials.token().await?;
        credentials.token().await?;
        assert_eq!(fake.calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn acquisition_errors_pass_through() -> TestResult {
        let credentials = Builder::new()
            .with_credential(Arc::new(FailingCredential))
            .build()?;

        let err = credentials.token().await.unwrap_err();
        assert!(err.is_acquisition(), "{err:?}");
        let got = format!("{err}");
        assert!(got.contains("test-only-credential-failure"), "{got}");
        Ok(())
    }

    #[test]
    fn empty_scope_is_a_build_error() {
        let err = Builder::new()
            .with_credential(FakeCredential::new("unused"))
            .with_scope("")
            .build()
            .unwrap_err();
        assert!(err.is_missing_scope(), "{err:?}");
    }
}
