//! Authentication: token verification + identity resolution.
pub mod access_jwt;
pub mod factory;
pub mod identity;

use thiserror::Error;

pub use access_jwt::{AccessJwtError, TokenVerifier};
pub use factory::build_auth_service;
pub use identity::{Identity, IdentityResolver, ResolveError};

use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] AccessJwtError),
    #[error("account not found")]
    AccountNotFound,
    #[error(transparent)]
    Store(RepoError),
}

impl From<ResolveError> for AuthError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::AccountNotFound => AuthError::AccountNotFound,
            ResolveError::Store(e) => AuthError::Store(e),
        }
    }
}

/// Verifier + resolver, composed once at startup and shared read-only.
#[derive(Clone)]
pub struct AuthService {
    verifier: TokenVerifier,
    resolver: IdentityResolver,
}

impl AuthService {
    pub fn new(verifier: TokenVerifier, resolver: IdentityResolver) -> Self {
        Self { verifier, resolver }
    }

    /// Verify `token`, then confirm its account still exists. No retries.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.verifier.verify(token)?;
        let identity = self.resolver.resolve(&claims).await?;
        Ok(identity)
    }
}
