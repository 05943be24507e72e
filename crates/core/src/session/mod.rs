//! Process-wide session state and its persistence.

mod storage;
mod store;

pub use storage::{JsonFileStorage, KeyValueStore, MemoryStorage};
pub use store::{SessionStore, SessionToken, TOKEN_KEY};
