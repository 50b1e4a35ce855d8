// ============================================================================
// CREDENTIAL STORE - Token + rol persistidos, dueños únicos de la sesión
// ============================================================================
// Claves durables: "token", "user", "role" (+ "userProfile" del caché de
// perfil). Todas se limpian juntas y de forma síncrona en el logout.
// ============================================================================

use crate::models::{LoginData, Role, UserSummary};
use crate::services::profile_cache::PROFILE_KEY;
use crate::utils::storage::{load_json, save_json, StorageBackend};
use std::rc::Rc;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const ROLE_KEY: &str = "role";

pub struct CredentialStore {
    storage: Rc<dyn StorageBackend>,
}

impl CredentialStore {
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Persistir las credenciales tras un login exitoso.
    pub fn persist_login(&self, data: &LoginData) -> Result<(), String> {
        self.storage.set(TOKEN_KEY, &data.token)?;
        save_json(&self.storage, USER_KEY, &data.user)?;
        self.storage.set(ROLE_KEY, data.user.role().as_str())?;
        log::info!("💾 Credenciales guardadas para {}", data.user.email);
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn user(&self) -> Option<UserSummary> {
        load_json(&self.storage, USER_KEY)
    }

    pub fn role(&self) -> Option<Role> {
        self.storage.get(ROLE_KEY).map(|raw| Role::parse(&raw))
    }

    pub fn has_session(&self) -> bool {
        self.token().is_some()
    }

    /// Limpieza atómica local: token, user, role y el perfil cacheado.
    /// Debe correr ANTES del logout remoto best-effort.
    pub fn clear_all(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.storage.remove(ROLE_KEY);
        self.storage.remove(PROFILE_KEY);
        log::info!("🗑️ Credenciales y perfil limpiados del storage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn sample_login() -> LoginData {
        LoginData {
            token: "tok-123".into(),
            user: UserSummary {
                id: 9,
                name: "Ana".into(),
                email: "ana@x.io".into(),
                role: "team".into(),
            },
        }
    }

    #[test]
    fn persist_and_restore_roundtrip() {
        let storage = MemoryStorage::new();
        let store = CredentialStore::new(storage);
        store.persist_login(&sample_login()).unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.role(), Some(Role::Team));
        assert_eq!(store.user().unwrap().email, "ana@x.io");
        assert!(store.has_session());
    }

    #[test]
    fn clear_all_removes_every_session_key() {
        let storage = MemoryStorage::new();
        storage.set(PROFILE_KEY, "{}").unwrap();
        let store = CredentialStore::new(storage.clone());
        store.persist_login(&sample_login()).unwrap();

        store.clear_all();

        assert!(!store.has_session());
        assert!(store.user().is_none());
        assert!(store.role().is_none());
        assert!(storage.get(PROFILE_KEY).is_none());
    }
}
