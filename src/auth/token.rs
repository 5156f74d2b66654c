// JWT token issuance and validation service

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user_id
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
///
/// Keys are derived from the process signing secret once at construction and
/// shared read-only across requests; validation is stateless (no revocation
/// list, no replay store).
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: i64, // in seconds
}

impl TokenService {
    /// Tokens expire 24 hours after issuance; there is no refresh flow, a
    /// leaked token stays valid until natural expiry.
    const TOKEN_DURATION_SECS: i64 = 86400;

    /// Create a new TokenService from the signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_duration: Self::TOKEN_DURATION_SECS,
        }
    }

    /// Issue a signed token embedding the user id and expiry
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.token_duration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate signature and expiry, returning the embedded user id
    pub fn validate(&self, token: &str) -> Result<i32, AuthError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes")
    }

    /// Build a token with explicit iat/exp, bypassing `issue`
    fn encode_with_claims(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// Flip the first character of the signature segment to another base64url
    /// character, keeping the token structurally parseable
    fn tamper_signature(token: &str) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let first = sig.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        parts[2] = format!("{}{}", replacement, &sig[1..]);
        parts.join(".")
    }

    #[test]
    fn test_issue_then_validate_resolves_user_id() {
        let service = test_token_service();
        let token = service.issue(42).unwrap();
        assert_eq!(service.validate(&token).unwrap(), 42);
    }

    #[test]
    fn test_token_expiration_is_24_hours() {
        let service = test_token_service();
        let token = service.issue(1).unwrap();

        // Decode without the service to inspect raw claims
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.exp - data.claims.iat, 86400);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            sub: 1,
            iat: Utc::now().timestamp() - 1000,
            exp: Utc::now().timestamp() - 500,
        };
        let token = encode_with_claims("test_secret_key_for_testing_purposes", &claims);

        let result = test_token_service().validate(&token);
        assert!(matches!(result, Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_expired_token_rejected_even_with_valid_signature() {
        // Same key signs and validates; only the expiry is at fault
        let service = test_token_service();
        let claims = Claims {
            sub: 7,
            iat: Utc::now().timestamp() - 90000,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode_with_claims("test_secret_key_for_testing_purposes", &claims);

        assert!(matches!(
            service.validate(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let service = test_token_service();
        let token = service.issue(1).unwrap();
        let tampered = tamper_signature(&token);

        assert!(matches!(
            service.validate(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = TokenService::new("secret1").issue(1).unwrap();
        let result = TokenService::new("secret2").validate(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        for malformed in ["", "not.a.token", "no_dots_at_all", "a.b"] {
            let result = service.validate(malformed);
            assert!(
                matches!(result, Err(AuthError::MalformedToken)),
                "expected MalformedToken for {:?}, got {:?}",
                malformed,
                result
            );
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_resolves_user_id(user_id in 1i32..1000000) {
            let service = test_token_service();
            let token = service.issue(user_id).unwrap();
            prop_assert_eq!(service.validate(&token).unwrap(), user_id);
        }

        #[test]
        fn prop_random_strings_are_rejected(garbage in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.validate(&garbage).is_err());
        }

        #[test]
        fn prop_any_tampered_signature_rejected(user_id in 1i32..1000000) {
            let service = test_token_service();
            let token = service.issue(user_id).unwrap();
            let tampered = tamper_signature(&token);
            prop_assert!(matches!(
                service.validate(&tampered),
                Err(AuthError::InvalidToken)
            ));
        }
    }
}
