use std::env;
use std::str::FromStr;
use std::sync::Arc;
use sea_orm::DatabaseConnection;

/// Which user column a login identifier is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Email,
    Any,
}

impl FromStr for LoginField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "username" => Ok(LoginField::Username),
            "email" => Ok(LoginField::Email),
            "any" | "" => Ok(LoginField::Any),
            other => Err(format!("unknown LOGIN_FIELD '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuperuserSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub login_field: LoginField,
    pub remove_slash: bool,
    pub cors_allowed_origins: Vec<String>,
    pub superuser: Option<SuperuserSeed>,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub enforcer: crate::auth::SharedEnforcer,
}

impl Config {
    /// Reads the process environment. Panics on missing required values,
    /// so it is only meant to run once at start-up.
    pub fn init() -> Config {
        let server_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let access_token_minutes = env::var("ACCESS_TOKEN_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<i64>()
            .expect("ACCESS_TOKEN_MINUTES must be a number");
        let refresh_token_days = env::var("REFRESH_TOKEN_DAYS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<i64>()
            .expect("REFRESH_TOKEN_DAYS must be a number");

        let login_field = env::var("LOGIN_FIELD")
            .unwrap_or_default()
            .parse::<LoginField>()
            .expect("LOGIN_FIELD must be one of username, email, any");

        let remove_slash = env::var("REMOVE_SLASH")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_default();

        let superuser = match (
            env::var("SUPERUSER_USERNAME"),
            env::var("SUPERUSER_EMAIL"),
            env::var("SUPERUSER_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(SuperuserSeed { username, email, password }),
            _ => None,
        };

        Config {
            server_host,
            server_port,
            database_url,
            jwt_secret,
            access_token_minutes,
            refresh_token_days,
            login_field,
            remove_slash,
            cors_allowed_origins,
            superuser,
        }
    }

    /// Defaults for an isolated instance; used by tests.
    pub fn with_secret(database_url: &str, jwt_secret: &str) -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            database_url: database_url.to_string(),
            jwt_secret: jwt_secret.to_string(),
            access_token_minutes: 30,
            refresh_token_days: 3,
            login_field: LoginField::Any,
            remove_slash: false,
            cors_allowed_origins: Vec::new(),
            superuser: None,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
