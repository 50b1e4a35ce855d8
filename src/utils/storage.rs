// ============================================================================
// STORAGE - Acceso a almacenamiento durable detrás de una interfaz inyectable
// ============================================================================
// Las piezas con estado (credential store, profile cache) reciben un
// Rc<dyn StorageBackend>, nunca tocan localStorage directamente.
// Esto permite dobles de prueba en memoria.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::{window, Storage};

pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// Backend real: window.localStorage.
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Rc<dyn StorageBackend> {
        Rc::new(Self)
    }

    fn storage(&self) -> Option<Storage> {
        window()?.local_storage().ok()?
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = self
            .storage()
            .ok_or("No se pudo acceder a localStorage")?;
        storage
            .set_item(key, value)
            .map_err(|_| "Error guardando en localStorage".to_string())
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Doble de prueba en memoria.
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Rc<dyn StorageBackend> {
        Rc::new(Self {
            entries: RefCell::new(HashMap::new()),
        })
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Guardar un valor serializable bajo una clave.
pub fn save_json<T: Serialize>(
    storage: &Rc<dyn StorageBackend>,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    storage.set(key, &json)
}

/// Cargar y deserializar un valor; `None` si falta o está corrupto.
pub fn load_json<T: DeserializeOwned>(storage: &Rc<dyn StorageBackend>, key: &str) -> Option<T> {
    let json = storage.get(key)?;
    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        save_json(&storage, "k", &vec![1, 2, 3]).unwrap();
        let loaded: Vec<i32> = load_json(&storage, "k").unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);

        storage.remove("k");
        assert!(load_json::<Vec<i32>>(&storage, "k").is_none());
    }

    #[test]
    fn load_json_ignores_corrupt_entries() {
        let storage = MemoryStorage::new();
        storage.set("k", "{not json").unwrap();
        assert!(load_json::<Vec<i32>>(&storage, "k").is_none());
    }
}

// Contra localStorage real; corre con wasm-pack test en un navegador.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_roundtrip() {
        let storage = LocalStorageBackend::new();

        storage.set("wf-test-key", "v1").unwrap();
        assert_eq!(storage.get("wf-test-key").as_deref(), Some("v1"));

        storage.remove("wf-test-key");
        assert!(storage.get("wf-test-key").is_none());
    }

    #[wasm_bindgen_test]
    fn local_storage_json_roundtrip() {
        let storage = LocalStorageBackend::new();

        save_json(&storage, "wf-test-json", &vec![1, 2, 3]).unwrap();
        let loaded: Vec<i32> = load_json(&storage, "wf-test-json").unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);

        storage.remove("wf-test-json");
    }
}
