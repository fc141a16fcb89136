//! Session persistence: the record schema and the store that holds it.

mod error;
mod file_store;
mod record;
mod store;

pub use error::StoreError;
pub use file_store::FileKv;
pub use record::{SessionRecord, SessionStatus};
pub use store::{KeyValueStore, MemoryKv, SESSION_KEY, SessionStore};
