pub mod soft_delete;
pub mod user_repository;
