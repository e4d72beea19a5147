pub mod auth_middleware;
pub mod trailing_slash;
