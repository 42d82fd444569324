//! Self-issued session tokens and external identity token verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    model::enums::UserType,
    server::{
        config::IdentityConfig,
        error::{auth::AuthError, AppError},
    },
};

/// Claims carried by tokens this service issues at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Local account id.
    pub sub: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn account_id(&self) -> Result<i32, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidToken(format!("non numeric subject {}", self.sub)))
    }
}

/// Claims read from an external identity token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// External identity uid.
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
}

/// HS256 signing and verification keys for session tokens.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expiry.num_seconds()
    }

    pub fn issue(&self, account_id: i32, user_type: UserType) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            user_type,
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Verifies tokens minted by the external identity provider.
pub struct IdentityVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    pub fn new(config: &IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        decode::<IdentityClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Identity token validation failed");
                AuthError::InvalidToken(e.to_string())
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const IDENTITY_SECRET: &str = "identity-test-secret";

    /// Mints an identity token the way the external provider would.
    pub fn identity_token(uid: &str, email: Option<&str>) -> String {
        #[derive(Serialize)]
        struct Claims<'a> {
            sub: &'a str,
            email: Option<&'a str>,
            iss: &'a str,
            exp: i64,
        }

        let claims = Claims {
            sub: uid,
            email,
            iss: "https://identity.test",
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub fn identity_config() -> IdentityConfig {
        IdentityConfig {
            secret: IDENTITY_SECRET.to_string(),
            issuer: Some("https://identity.test".to_string()),
            audience: None,
        }
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let keys = TokenKeys::new("secret", 24);
        let token = keys.issue(42, UserType::Partner).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.account_id().unwrap(), 42);
        assert_eq!(claims.user_type, UserType::Partner);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = TokenKeys::new("one", 1).issue(1, UserType::Client).unwrap();
        assert!(TokenKeys::new("two", 1).verify(&token).is_err());
    }

    #[test]
    fn identity_token_is_not_a_session_token() {
        let token = identity_token("uid-1", None);
        assert!(TokenKeys::new(IDENTITY_SECRET, 1).verify(&token).is_err());

        let verifier = IdentityVerifier::new(&identity_config());
        assert_eq!(verifier.verify(&token).unwrap().sub, "uid-1");
    }

    #[test]
    fn identity_verifier_checks_issuer() {
        let mut config = identity_config();
        config.issuer = Some("https://other.test".to_string());
        let verifier = IdentityVerifier::new(&config);

        assert!(verifier.verify(&identity_token("uid-1", None)).is_err());
    }
}
