use crate::config::Config;
use crate::entities::user;
use crate::models::auth_model::{Claims, TokenType};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

pub struct JwtUtils;

impl JwtUtils {
    /// Short-lived bearer token; returns the token and its expiry (unix seconds).
    pub fn generate_access_token(cfg: &Config, user: &user::Model) -> Result<(String, usize), Error> {
        Self::generate(cfg, user, TokenType::Access, Duration::minutes(cfg.access_token_minutes))
    }

    pub fn generate_refresh_token(cfg: &Config, user: &user::Model) -> Result<(String, usize), Error> {
        Self::generate(cfg, user, TokenType::Refresh, Duration::days(cfg.refresh_token_days))
    }

    pub fn validate_access_token(cfg: &Config, token: &str) -> Result<Claims, Error> {
        Self::validate(cfg, token, TokenType::Access)
    }

    pub fn validate_refresh_token(cfg: &Config, token: &str) -> Result<Claims, Error> {
        Self::validate(cfg, token, TokenType::Refresh)
    }

    fn generate(
        cfg: &Config,
        user: &user::Model,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<(String, usize), Error> {
        let now = Utc::now();
        let exp = (now + lifetime).timestamp() as usize;
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp,
            iat: now.timestamp() as usize,
            // unique per token, so two tokens minted in the same second still differ
            jti: Uuid::new_v4().to_string(),
            token_type,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))?;
        Ok((token, exp))
    }

    fn validate(cfg: &Config, token: &str, expected: TokenType) -> Result<Claims, Error> {
        let decoding_key = DecodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        if token_data.claims.token_type != expected {
            return Err(Error::from(ErrorKind::InvalidToken));
        }
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> user::Model {
        let now = Utc::now();
        user::Model {
            id: 42,
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn cfg() -> Config {
        Config::with_secret("sqlite::memory:", "test-secret")
    }

    #[test]
    fn access_token_round_trip() {
        let (token, exp) = JwtUtils::generate_access_token(&cfg(), &user()).unwrap();
        let claims = JwtUtils::validate_access_token(&cfg(), &token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "reader");
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        let (access, _) = JwtUtils::generate_access_token(&cfg(), &user()).unwrap();
        let (refresh, _) = JwtUtils::generate_refresh_token(&cfg(), &user()).unwrap();

        let err = JwtUtils::validate_refresh_token(&cfg(), &access).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidToken));
        assert!(JwtUtils::validate_access_token(&cfg(), &refresh).is_err());
    }

    #[test]
    fn tokens_are_unique() {
        let (a, _) = JwtUtils::generate_access_token(&cfg(), &user()).unwrap();
        let (b, _) = JwtUtils::generate_access_token(&cfg(), &user()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = JwtUtils::generate_access_token(&cfg(), &user()).unwrap();
        let other = Config::with_secret("sqlite::memory:", "another-secret");
        let err = JwtUtils::validate_access_token(&other, &token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }
}
