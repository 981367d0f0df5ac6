use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the email of the authenticated user.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies signed, time-limited bearer tokens.
///
/// The signing key is loaded once at startup from [`crate::config::Config`]
/// and held here for the lifetime of the process; nothing reads the secret
/// per-request. Verification is stateless, so any process replica holding
/// the same secret can verify a token without shared mutable state. The
/// trade-off is that there is no server-side revocation before expiry.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issues a JWT for the given subject (user email), expiring after the
    /// configured TTL.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(self.ttl_minutes))
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?
            .timestamp() as usize;

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT string and decodes its claims.
    ///
    /// Default validation applies: the signature must match and the token
    /// must not be expired. Client-supplied claims are never trusted without
    /// passing through this check. All failures map to a generic 401.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test_secret", 60)
    }

    #[test]
    fn test_token_issue_and_verify() {
        let tokens = service();
        let token = tokens.issue("alice@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
    }

    #[test]
    fn test_token_resolves_to_issuing_subject_only() {
        let tokens = service();
        let for_alice = tokens.issue("alice@example.com").unwrap();
        let for_bob = tokens.issue("bob@example.com").unwrap();

        assert_eq!(tokens.verify(&for_alice).unwrap().sub, "alice@example.com");
        assert_eq!(tokens.verify(&for_bob).unwrap().sub, "bob@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service();

        let expiration = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;
        let claims = Claims {
            sub: "expired@example.com".to_string(),
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret".as_bytes()),
        )
        .unwrap();

        match tokens.verify(&expired_token) {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let tokens = service();
        let other = TokenService::new("a_completely_different_secret", 60);

        let token = other.issue("mallory@example.com").unwrap();
        match tokens.verify(&token) {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_tampered_token_rejected() {
        let tokens = service();
        let token = tokens.issue("victim@example.com").unwrap();

        // Flip part of the payload segment; the signature no longer matches.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        parts[1] = parts[1]
            .chars()
            .rev()
            .collect::<String>();
        let tampered = parts.join(".");

        assert!(matches!(
            tokens.verify(&tampered),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = service();
        assert!(matches!(
            tokens.verify("not-a-jwt-at-all"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
