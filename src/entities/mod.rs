pub mod article;
pub mod comment;
pub mod resource;
pub mod user;
