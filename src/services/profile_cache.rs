// ============================================================================
// PROFILE CACHE - Caché read-through del perfil en storage durable
// ============================================================================
// Una sola copia cacheada (cliente mono-usuario). Las lecturas sin
// force_refresh se sirven del caché sin tocar la red; las escrituras
// exitosas del perfil sobreescriben la misma entrada (write-through).
// Un fetch fallido deja el caché intacto: stale-but-available gana.
// ============================================================================

use crate::models::ProfileSnapshot;
use crate::utils::storage::{load_json, save_json, StorageBackend};
use std::rc::Rc;

pub const PROFILE_KEY: &str = "userProfile";

pub struct ProfileCache {
    storage: Rc<dyn StorageBackend>,
}

impl ProfileCache {
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Copia cacheada, si existe y deserializa.
    pub fn cached(&self) -> Option<ProfileSnapshot> {
        load_json(&self.storage, PROFILE_KEY)
    }

    /// Decisión de lectura: `Some(snapshot)` => servir del caché sin red,
    /// `None` => hay que hacer fetch (forzado o caché frío).
    pub fn serve_from_cache(&self, force_refresh: bool) -> Option<ProfileSnapshot> {
        if force_refresh {
            return None;
        }
        self.cached()
    }

    /// Sobreescribir la entrada cacheada (fetch o update exitoso).
    pub fn store(&self, snapshot: &ProfileSnapshot) -> Result<(), String> {
        save_json(&self.storage, PROFILE_KEY, snapshot)?;
        log::info!("💾 Perfil cacheado para {}", snapshot.email);
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove(PROFILE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    fn snapshot(name: &str) -> ProfileSnapshot {
        ProfileSnapshot {
            name: name.into(),
            email: "ana@x.io".into(),
            phone_number: None,
            profile_picture: None,
        }
    }

    #[test]
    fn warm_cache_serves_non_forced_reads() {
        let cache = ProfileCache::new(MemoryStorage::new());
        cache.store(&snapshot("Ana")).unwrap();

        // Lecturas repetidas sin force: siempre del caché, cero red
        assert_eq!(cache.serve_from_cache(false).unwrap().name, "Ana");
        assert_eq!(cache.serve_from_cache(false).unwrap().name, "Ana");
    }

    #[test]
    fn forced_read_always_goes_to_network() {
        let cache = ProfileCache::new(MemoryStorage::new());
        cache.store(&snapshot("Ana")).unwrap();

        // force_refresh ignora el caché aunque esté caliente
        assert!(cache.serve_from_cache(true).is_none());
    }

    #[test]
    fn cold_cache_requires_fetch() {
        let cache = ProfileCache::new(MemoryStorage::new());
        assert!(cache.serve_from_cache(false).is_none());
    }

    #[test]
    fn write_through_is_visible_to_next_read() {
        let cache = ProfileCache::new(MemoryStorage::new());
        cache.store(&snapshot("Ana")).unwrap();

        // Simula un update-profile exitoso
        cache.store(&snapshot("Ana María")).unwrap();

        assert_eq!(cache.serve_from_cache(false).unwrap().name, "Ana María");
    }

    #[test]
    fn clear_empties_the_entry() {
        let cache = ProfileCache::new(MemoryStorage::new());
        cache.store(&snapshot("Ana")).unwrap();
        cache.clear();
        assert!(cache.cached().is_none());
    }
}
