//! Identity resolution: verified claims → `Identity`.
//!
//! The role comes from the token, not from the account row. A role change only
//! takes effect once a new token is issued.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::store::AccountStore;
use crate::services::auth::access_jwt::Claims;

/// Any role other than `admin` is an ordinary member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

/// The acting account for one request. Built by the authorization gate, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    account_id: Uuid,
    role: Role,
}

impl Identity {
    pub fn new(account_id: Uuid, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("account not found")]
    AccountNotFound,
    #[error(transparent)]
    Store(#[from] RepoError),
}

#[derive(Clone)]
pub struct IdentityResolver {
    accounts: Arc<dyn AccountStore>,
}

impl IdentityResolver {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    pub async fn resolve(&self, claims: &Claims) -> Result<Identity, ResolveError> {
        if !self.accounts.exists(claims.account_id).await? {
            return Err(ResolveError::AccountNotFound);
        }

        Ok(Identity::new(claims.account_id, claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryAccountStore;

    #[test]
    fn unknown_roles_deserialize_as_user() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        let role: Role = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, Role::User);
        assert_eq!(Role::default(), Role::User);
    }

    #[tokio::test]
    async fn resolves_existing_account_with_token_role() {
        let account_id = Uuid::new_v4();
        // The account store knows nothing about roles; the token's role is used as-is.
        let resolver = IdentityResolver::new(Arc::new(MemoryAccountStore::with_accounts([
            account_id,
        ])));

        let identity = resolver
            .resolve(&Claims {
                account_id,
                role: Role::Admin,
            })
            .await
            .unwrap();

        assert_eq!(identity.account_id(), account_id);
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn missing_account_is_reported() {
        let resolver = IdentityResolver::new(Arc::new(MemoryAccountStore::default()));

        let err = resolver
            .resolve(&Claims {
                account_id: Uuid::new_v4(),
                role: Role::User,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::AccountNotFound));
    }
}
