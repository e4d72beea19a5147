pub mod article_service;
pub mod auth_service;
pub mod comment_service;
pub mod resource_service;
pub mod user_service;
