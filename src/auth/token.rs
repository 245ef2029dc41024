use crate::error::VitiError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Username.
    pub sub: String,
    /// User id.
    pub id: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Shared-secret keys used to sign and check access tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, algorithm: &str, ttl: Duration) -> Result<Self, VitiError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| VitiError::UnsupportedAlgorithm(algorithm.to_string()))?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(VitiError::UnsupportedAlgorithm(format!("{algorithm:?}")));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl,
        })
    }

    pub fn issue(&self, username: &str, user_id: i64) -> Result<String, VitiError> {
        let claims = Claims {
            sub: username.to_string(),
            id: user_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding)?)
    }

    /// Any decoding failure, expiry included, is reported as `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, VitiError> {
        let validation = Validation::new(self.algorithm);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| VitiError::Unauthorized)
    }
}
