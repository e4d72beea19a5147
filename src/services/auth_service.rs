use argon2::{
    password_hash::{
        rand_core::OsRng,
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString
    },
    Argon2
};
use chrono::Utc;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use sea_orm::*;
use crate::config::Config;
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::models::auth_model::*;
use crate::repositories::user_repository::UserRepository;
use crate::utils::api_response::ValidationErrorDetail;
use crate::utils::jwt_utils::JwtUtils;
use crate::utils::validated_wrapper::validate_payload;
use crate::utils::validator_utils::validate_password_strength;

pub struct AuthService;

impl AuthService {
    pub async fn register_user(
        db: &DatabaseConnection,
        payload: RegisterRequest,
    ) -> AppResult<RegisterResponse> {
        validate_payload(&payload)?;
        Self::ensure_strong_password("password", &payload.password, &payload.username)?;

        // 1. Check Duplicate
        let duplicates = UserRepository::find_duplicates(db, &payload.username, &payload.email, None).await?;
        if !duplicates.is_empty() {
            return Err(Self::duplicate_error(&duplicates, &payload.username, &payload.email));
        }

        // 2. Hash Password
        let hashed_password = Self::hash_password(&payload.password)?;

        // 3. Save User
        let user = UserRepository::create(db, payload.username, payload.email, hashed_password, false, false).await?;
        tracing::info!(user_id = user.id, username = %user.username, "user registered");

        Ok(RegisterResponse {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    pub async fn login_user(
        db: &DatabaseConnection,
        cfg: &Config,
        payload: LoginRequest,
    ) -> AppResult<LoginResponse> {
        validate_payload(&payload)?;

        let invalid = || AppError::unauthorized("AUTH_FAILED", "Invalid credentials");

        let user = UserRepository::find_active_by_login_id(db, cfg.login_field, &payload.login)
            .await?
            .ok_or_else(invalid)?;

        if !Self::verify_password(&payload.password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "login failed: wrong password");
            return Err(invalid());
        }

        let mut active: user::ActiveModel = user.into();
        active.last_login = Set(Some(Utc::now()));
        let user = active.update(db).await?;

        let (access, access_expires_at) = JwtUtils::generate_access_token(cfg, &user)?;
        let (refresh, refresh_expires_at) = JwtUtils::generate_refresh_token(cfg, &user)?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(LoginResponse {
            access,
            refresh,
            access_expires_at,
            refresh_expires_at,
            token_type: "Bearer".to_string(),
        })
    }

    pub async fn refresh_token(
        db: &DatabaseConnection,
        cfg: &Config,
        payload: RefreshTokenRequest,
    ) -> AppResult<RefreshTokenResponse> {
        validate_payload(&payload)?;

        // 1. Validate Token Signature and type
        let claims = JwtUtils::validate_refresh_token(cfg, &payload.refresh).map_err(Self::token_error)?;

        // 2. The account must still be usable
        let user = UserRepository::find_active_by_id(db, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("USER_INACTIVE", "User not found or inactive"))?;

        let (access, access_expires_at) = JwtUtils::generate_access_token(cfg, &user)?;
        Ok(RefreshTokenResponse { access, access_expires_at })
    }

    /// Resolves a bearer access token to its (active) user.
    pub async fn authenticate_bearer<C: ConnectionTrait>(
        db: &C,
        cfg: &Config,
        token: &str,
    ) -> AppResult<user::Model> {
        let claims = JwtUtils::validate_access_token(cfg, token).map_err(Self::token_error)?;

        UserRepository::find_active_by_id(db, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("USER_INACTIVE", "User not found or inactive"))
    }

    // --- UTILS ---

    pub(crate) fn ensure_strong_password(field: &str, password: &str, username: &str) -> AppResult<()> {
        validate_password_strength(password, username).map_err(|e| {
            AppError::Validation(vec![ValidationErrorDetail {
                field: field.to_string(),
                title: e.code.to_string(),
                message: e.message.map(|m| m.to_string()).unwrap_or_else(|| "Invalid password".to_string()),
            }])
        })
    }

    pub(crate) fn duplicate_error(duplicates: &[user::Model], username: &str, email: &str) -> AppError {
        let u_exists = duplicates.iter().any(|u| u.username == username);
        let e_exists = duplicates.iter().any(|u| u.email == email);
        let (code, msg) = if u_exists && e_exists { ("AUTH_DUPLICATE", "Username and Email already exists") }
            else if u_exists { ("AUTH_DUPLICATE_USERNAME", "Username already exists") }
            else { ("AUTH_DUPLICATE_EMAIL", "Email already exists") };
        AppError::conflict(code, msg)
    }

    fn token_error(e: JwtError) -> AppError {
        let (code, message) = match e.kind() {
            ErrorKind::ExpiredSignature => ("TOKEN_EXPIRED", "Token has expired"),
            ErrorKind::InvalidToken => ("TOKEN_INVALID", "Token is invalid"),
            ErrorKind::InvalidSignature => ("TOKEN_BAD_SIGNATURE", "Invalid token signature"),
            _ => ("AUTH_FAILED", "Authentication failed"),
        };
        AppError::unauthorized(code, message)
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }
}
