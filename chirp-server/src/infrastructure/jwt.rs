use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("token has empty subject")]
    EmptySubject,
}

/// Claims сессионного токена identity provider'а. `sub` — id пользователя.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct SessionClaims {
    pub(crate) sub: String,
    pub(crate) exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) sid: Option<String>,
}

/// Проверяет сессионные токены. Сервер токены не выпускает.
pub(crate) struct JwtService {
    secret: String,
}

impl JwtService {
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str) -> Self {
        JwtService {
            secret: secret.into(),
        }
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(JwtError::EmptySubject);
        }

        Ok(token_data.claims)
    }

    #[cfg(test)]
    pub(crate) fn issue_for_tests(&self, sub: &str, ttl_seconds: i64) -> String {
        use chrono::{Duration, Utc};
        use jsonwebtoken::{EncodingKey, Header, encode};

        let claims = SessionClaims {
            sub: sub.to_string(),
            exp: (Utc::now() + Duration::seconds(ttl_seconds)).timestamp(),
            sid: Some("sess_test".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("test token must encode")
    }
}
