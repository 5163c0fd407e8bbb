//! Bearer tokens for the admin surface.
//!
//! The service verifies tokens signed with a shared secret. Issuing lives
//! next to verification so operators and tests mint tokens with the same
//! key handling.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use landing_core::types::ActorId;
use serde::{Deserialize, Serialize};

const ALGORITHM: Algorithm = Algorithm::HS256;

const DEFAULT_TOKEN_TTL_MINS: i64 = 15;

pub type TokenResult<T> = Result<T, jsonwebtoken::errors::Error>;

/// Payload of a landing bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Recorded as `actorId` on every audit entry the bearer causes.
    pub sub: ActorId,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: impl Into<ActorId>, role: impl Into<String>, ttl_mins: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: subject.into(),
            role: role.into(),
            iat,
            exp: iat + ttl_mins * 60,
        }
    }
}

/// Shared-secret token settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_ttl_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` (required, non-empty) and `JWT_TOKEN_TTL_MINS`
    /// (default `15`).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a TTL that is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let token_ttl_mins = match std::env::var("JWT_TOKEN_TTL_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_TOKEN_TTL_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_TOKEN_TTL_MINS,
        };

        Self {
            secret,
            token_ttl_mins,
        }
    }

    /// Sign a token for `subject` acting with `role`.
    pub fn issue(&self, subject: &str, role: &str) -> TokenResult<String> {
        let claims = Claims::new(subject, role, self.token_ttl_mins);
        encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry, then hand back the claims.
    pub fn verify(&self, token: &str) -> TokenResult<Claims> {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::roles::{ROLE_ADMIN, ROLE_VIEWER};

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            token_ttl_mins: 5,
        }
    }

    fn sign(claims: &impl Serialize, secret: &str) -> String {
        encode(
            &Header::new(ALGORITHM),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_subject_and_role() {
        let jwt = config("landing-secret");
        let token = jwt.issue("editor-7", ROLE_ADMIN).unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "editor-7");
        assert_eq!(claims.role, ROLE_ADMIN);
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn long_expired_token_is_refused() {
        let mut claims = Claims::new("editor-7", ROLE_VIEWER, 0);
        claims.iat -= 3600;
        claims.exp -= 3600;

        let token = sign(&claims, "landing-secret");
        assert!(config("landing-secret").verify(&token).is_err());
    }

    #[test]
    fn token_signed_elsewhere_is_refused() {
        let token = config("someone-else").issue("editor-7", ROLE_ADMIN).unwrap();
        assert!(config("landing-secret").verify(&token).is_err());
    }

    #[test]
    fn token_without_subject_is_refused() {
        let now = chrono::Utc::now().timestamp();
        let claims = serde_json::json!({ "role": ROLE_ADMIN, "iat": now, "exp": now + 60 });

        let token = sign(&claims, "landing-secret");
        assert!(config("landing-secret").verify(&token).is_err());
    }
}
