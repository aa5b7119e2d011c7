//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::store::AccountStore;
use crate::services::auth::{AuthService, IdentityResolver, TokenVerifier};

pub fn build_auth_service(config: &Config, accounts: Arc<dyn AccountStore>) -> Arc<AuthService> {
    let verifier = TokenVerifier::new(
        config.access_token_secret.as_bytes(),
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    );

    Arc::new(AuthService::new(verifier, IdentityResolver::new(accounts)))
}
