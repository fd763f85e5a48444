pub mod auth;
pub mod directory_service;
pub mod student_service;
