// Utils compartidos

pub mod storage;
pub mod url;

pub use storage::{LocalStorageBackend, MemoryStorage, StorageBackend};
pub use url::url_encode;
