mod config;
mod errors;
mod file;
mod memory;
mod types;

pub use config::ADMIN_SESSION_FILE;
pub use errors::StoreError;
pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
pub use types::{PersistedSession, SessionStore};
