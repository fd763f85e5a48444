pub mod admin;
pub mod alumni;
pub mod health;
pub mod students;
