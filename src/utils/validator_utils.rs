use std::borrow::Cow;
use serde::{de::Error as _, Deserialize, Deserializer};
use validator::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890",
    "qwerty123", "qwertyuiop", "iloveyou", "sunshine", "princess", "football",
    "baseball", "welcome1", "admin123", "letmein1", "trustno1", "passw0rd",
    "superman", "abc12345", "11111111", "00000000", "q1w2e3r4", "1q2w3e4r",
];

const MAX_SIMILARITY: f64 = 0.7;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("is_required", "This field is required"))
    } else {
        Ok(())
    }
}

/// Password policy shared by registration and password change.
pub fn validate_password_strength(password: &str, username: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(error(
            "password_too_short",
            "This password is too short. It must contain at least 8 characters.",
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(error("password_entirely_numeric", "This password is entirely numeric."));
    }
    if COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
        return Err(error("password_too_common", "This password is too common."));
    }
    if !username.is_empty() && similarity(&password.to_lowercase(), &username.to_lowercase()) >= MAX_SIMILARITY {
        return Err(error("password_too_similar", "The password is too similar to the username."));
    }
    Ok(())
}

// 2 * LCS / (|a| + |b|)
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    for ca in &a {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        prev = row;
    }

    (2 * prev[b.len()]) as f64 / (a.len() + b.len()) as f64
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts `true`, `1`, `"yes"`, `"off"` and friends; absent or `null` is `false`.
/// Anything outside the recognised spellings is rejected.
pub fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<Flag>::deserialize(deserializer)?;
    match flag {
        None => Ok(false),
        Some(Flag::Bool(b)) => Ok(b),
        Some(Flag::Int(1)) => Ok(true),
        Some(Flag::Int(0)) => Ok(false),
        Some(Flag::Int(n)) => Err(D::Error::custom(format!("`{n}` is not a valid boolean"))),
        Some(Flag::Float(n)) if n == 1.0 => Ok(true),
        Some(Flag::Float(n)) if n == 0.0 => Ok(false),
        Some(Flag::Float(n)) => Err(D::Error::custom(format!("`{n}` is not a valid boolean"))),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "t" | "on" => Ok(true),
            "false" | "0" | "no" | "n" | "f" | "off" => Ok(false),
            _ => Err(D::Error::custom(format!("`{s}` is not a valid boolean"))),
        },
    }
}
