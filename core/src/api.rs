//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `noted_core::api` instead of reaching into internal
//! modules.

pub use crate::config::{
    get_noted_data_dir, get_token_file_path, load_default, AppConfig, LoggingConfig, ServerConfig,
};
pub use crate::error::CliError;
pub use crate::notes::{Note, NoteDraft, NotePatch, NoteStore};
pub use crate::session::{
    AuthKind, FileTokenStore, MemoryTokenStore, Session, SessionManager, TokenStore,
};
pub use crate::status::StatusChannel;
pub use crate::transport::{ApiClient, ApiError, ApiErrorKind, TokenResponse};
