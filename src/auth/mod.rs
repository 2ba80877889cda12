//! Session bookkeeping: persisted token storage and JWT payload decoding.

pub mod session;
pub mod storage;
pub mod token;

pub use session::{Session, SessionError, SessionManager, SessionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use token::{decode_claims, token_from_query, Claims};
