pub mod models;
pub mod store;

pub use models::{Note, NoteDraft, NotePatch};
pub use store::NoteStore;
