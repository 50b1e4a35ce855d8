pub mod api_client;
pub mod credential_store;
pub mod error;
pub mod profile_cache;

pub use api_client::ApiClient;
pub use credential_store::CredentialStore;
pub use error::ApiError;
pub use profile_cache::ProfileCache;
