pub mod content;
pub mod memory;
pub mod share;
pub mod user;

pub use content::PostgresContentRepository;
pub use memory::InMemoryContentRepository;
pub use memory::InMemoryShareRepository;
pub use memory::InMemoryUserRepository;
pub use share::PostgresShareRepository;
pub use user::PostgresUserRepository;
