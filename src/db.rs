pub mod notification_repo;
pub mod seed;
pub mod session_repo;
pub mod store;
pub mod user_repo;
pub mod workspace;

pub use session_repo::{Session, SessionRepository};
pub use user_repo::UserRepository;
