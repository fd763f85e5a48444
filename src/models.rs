pub mod admin;
pub mod alumni;
pub mod geo;
pub mod student;
