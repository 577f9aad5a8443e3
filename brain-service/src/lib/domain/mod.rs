pub mod authentication;
pub mod content;
pub mod share;
pub mod user;
