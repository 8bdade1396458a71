//! Bearer token verification.
//!
//! Aviola validates HS256 access tokens minted by the external identity
//! service; it never issues tokens itself.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aviola_core::config::auth::AuthConfig;
use aviola_core::error::AppError;
use aviola_core::result::AppResult;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier.
    pub sub: Uuid,
    /// Role granted by the identity service (`user` or `admin`).
    #[serde(default = "default_role")]
    pub role: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

fn default_role() -> String {
    "user".to_string()
}

impl Claims {
    /// Whether the token grants administrative access.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Validates access tokens against the shared HMAC secret.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier").finish_non_exhaustive()
    }
}

impl JwtVerifier {
    /// Creates a verifier from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_seconds;
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    fn token(secret: &str, claims: &Claims) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trips_claims() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway_seconds: 0,
        };
        let verifier = JwtVerifier::new(&config);
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id,
            role: "admin".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        let decoded = verifier.verify(&token("test-secret", &claims)).unwrap();
        assert_eq!(decoded.sub, user_id);
        assert!(decoded.is_admin());
    }

    #[test]
    fn test_wrong_secret_and_expired_tokens_rejected() {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_leeway_seconds: 0,
        };
        let verifier = JwtVerifier::new(&config);
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: "user".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        assert!(verifier.verify(&token("other-secret", &claims)).is_err());

        let expired = Claims {
            exp: chrono::Utc::now().timestamp() - 3600,
            ..claims
        };
        assert!(verifier.verify(&token("test-secret", &expired)).is_err());
    }
}
