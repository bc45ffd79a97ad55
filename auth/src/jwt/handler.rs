use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so the service defines its own token payload.
/// Uses HS256 (HMAC with SHA-256). One handler is bound to one secret, so a
/// token signed by one handler never validates under a handler built from a
/// different secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `EmptyKey` - The secret is empty and cannot key an HMAC safely
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptyKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token against the current system time.
    ///
    /// The `exp` claim is mandatory and no clock leeway is granted.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidSignature` - Token was signed with another key
    /// * `DecodingFailed` - Token is malformed or misses required claims
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(classify)
    }

    /// Decode a JWT token, checking its signature but not its expiration.
    ///
    /// Callers that evaluate expiry against their own clock use this and then
    /// compare the `exp` claim themselves.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was signed with another key
    /// * `DecodingFailed` - Token is malformed or misses required claims
    pub fn decode_ignoring_expiry<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(classify)
    }
}

fn classify(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::DecodingFailed(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;
    use std::time::UNIX_EPOCH;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs() as i64
    }

    fn claims_expiring_at(exp: i64) -> TestClaims {
        TestClaims {
            sub: "user123".to_string(),
            exp,
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();
        let claims = claims_expiring_at(now() + 3600);

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(JwtHandler::new(b""), Err(JwtError::EmptyKey)));
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let token = handler1
            .encode(&claims_expiring_at(now() + 3600))
            .expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::InvalidSignature);

        let result = handler2.decode_ignoring_expiry::<TestClaims>(&token);
        assert_eq!(result.unwrap_err(), JwtError::InvalidSignature);
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();
        let claims = claims_expiring_at(now() - 10);
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            handler.decode::<TestClaims>(&token).unwrap_err(),
            JwtError::TokenExpired
        );

        // Signature is still checked, expiry is left to the caller
        let decoded: TestClaims = handler
            .decode_ignoring_expiry(&token)
            .expect("Failed to decode expired token");
        assert_eq!(decoded, claims);
    }
}
