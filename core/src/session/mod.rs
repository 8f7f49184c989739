pub mod manager;
pub mod token_store;

pub use manager::{AuthKind, Session, SessionManager};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
