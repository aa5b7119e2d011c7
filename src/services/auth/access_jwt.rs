use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::identity::Role;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubUuid,
}

/// Access token (JWT) claims as issued by the account service.
///
/// NOTE:
/// - older tokens carry the account id as `id` instead of `sub`; both are accepted.
/// - `role` is optional; a missing, null or unknown role is an ordinary user.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    #[serde(alias = "id")]
    sub: String,
    #[serde(default)]
    role: Option<Role>,
    exp: u64,
}

/// Verified claims handed to the identity resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claims {
    pub account_id: Uuid,
    pub role: Role,
}

/// HS256 access-token verifier.
///
/// - Built once at startup from the configured secret; immutable afterwards.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        secret: &[u8],
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        // `exp` is required by default; issuer/audience only when configured
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signature, expiry, then the claims this API relies on.
    pub fn verify(&self, token: &str) -> Result<Claims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }

        // Project convention: subject is a UUID
        let account_id =
            Uuid::parse_str(claims.sub.trim()).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(Claims {
            account_id,
            role: claims.role.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{SECRET, now_secs, sign};

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET.as_bytes(), None, None, 0)
    }

    #[test]
    fn accepts_valid_token() {
        let account_id = Uuid::new_v4();
        let token = sign(
            SECRET,
            json!({ "sub": account_id, "role": "admin", "exp": now_secs() + 600 }),
        );

        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.account_id, account_id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn accepts_legacy_id_claim_and_defaults_role() {
        let account_id = Uuid::new_v4();
        let token = sign(SECRET, json!({ "id": account_id, "exp": now_secs() + 600 }));

        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.account_id, account_id);
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn null_role_is_an_ordinary_user() {
        let account_id = Uuid::new_v4();
        let token = sign(
            SECRET,
            json!({ "sub": account_id, "role": null, "exp": now_secs() + 600 }),
        );

        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(
            SECRET,
            json!({ "sub": Uuid::new_v4(), "role": "admin", "exp": now_secs() - 3600 }),
        );

        assert!(matches!(
            verifier().verify(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign(
            "some-other-secret",
            json!({ "sub": Uuid::new_v4(), "exp": now_secs() + 600 }),
        );

        assert!(matches!(
            verifier().verify(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn rejects_malformed_and_claimless_tokens() {
        assert!(verifier().verify("not-a-jwt").is_err());

        // no exp at all
        let token = sign(SECRET, json!({ "sub": Uuid::new_v4() }));
        assert!(verifier().verify(&token).is_err());
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let token = sign(
            SECRET,
            json!({ "sub": "507f1f77bcf86cd799439011", "exp": now_secs() + 600 }),
        );

        assert!(matches!(
            verifier().verify(&token),
            Err(AccessJwtError::InvalidSubUuid)
        ));
    }

    #[test]
    fn checks_audience_only_when_configured() {
        let token = sign(
            SECRET,
            json!({ "sub": Uuid::new_v4(), "aud": "other-api", "exp": now_secs() + 600 }),
        );

        let strict = TokenVerifier::new(SECRET.as_bytes(), None, Some("content-api"), 0);
        assert!(strict.verify(&token).is_err());
        assert!(verifier().verify(&token).is_ok());
    }
}
