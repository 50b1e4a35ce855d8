// ============================================================================
// PROFILE VIEWMODEL - Lectura read-through + update write-through
// ============================================================================
// El fetch de red entra inyectado (get_profile_via), igual que el
// StorageBackend: los tests cuentan invocaciones con un doble sin
// levantar un servidor.
// ============================================================================

use crate::models::ProfileSnapshot;
use crate::services::ApiError;
use crate::state::AppState;
use std::future::Future;
use web_sys::{File, FormData};

pub struct ProfileViewModel {
    state: AppState,
}

impl ProfileViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Contrato del caché: sin force y con caché caliente no hay red;
    /// con force (o caché frío) siempre se fetchea, se normaliza y se
    /// sobreescribe la entrada durable. Un fetch fallido deja el caché
    /// como estaba (stale-but-available).
    pub async fn get_profile(&self, force_refresh: bool) -> Result<ProfileSnapshot, ApiError> {
        let api = self.state.api();
        self.get_profile_via(force_refresh, move || async move { api.get_user().await })
            .await
    }

    /// Núcleo de la lectura con el fetcher inyectado.
    async fn get_profile_via<F, Fut>(
        &self,
        force_refresh: bool,
        fetch: F,
    ) -> Result<ProfileSnapshot, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ProfileSnapshot, ApiError>>,
    {
        let cache = self.state.profile_cache();

        if let Some(snapshot) = cache.serve_from_cache(force_refresh) {
            log::info!("📋 Perfil servido del caché (sin red)");
            self.state.profile.set_snapshot(Some(snapshot.clone()));
            return Ok(snapshot);
        }

        let token = self.state.profile_guard.begin();
        self.state.profile.set_loading(true);
        self.state.notify_change();

        match fetch().await {
            Ok(snapshot) => {
                if !self.state.profile_guard.is_current(token) {
                    log::warn!("🔄 Respuesta de perfil obsoleta descartada");
                    return Ok(snapshot);
                }
                if let Err(e) = cache.store(&snapshot) {
                    log::error!("❌ Error guardando perfil en caché: {}", e);
                }
                self.state.profile.set_snapshot(Some(snapshot.clone()));
                self.state.profile.set_loading(false);
                self.state.profile.set_error(None);
                self.state.notify_change();
                Ok(snapshot)
            }
            Err(e) => {
                if self.state.profile_guard.is_current(token) {
                    // Caché intacto: preferimos stale a vacío
                    self.state.profile.set_loading(false);
                    self.state.profile.set_error(Some(e.to_string()));
                    self.state.notify_change();
                }
                Err(e)
            }
        }
    }

    /// Update multipart del perfil. El snapshot devuelto por el servidor
    /// sobreescribe el caché (write-through): la próxima lectura sin
    /// force ya ve los campos nuevos sin tocar la red.
    pub async fn update_profile(
        &self,
        name: &str,
        email: &str,
        phone_number: &str,
        picture: Option<File>,
    ) -> Result<ProfileSnapshot, ApiError> {
        if name.is_empty() || email.is_empty() {
            return Err(ApiError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        let form = FormData::new()
            .map_err(|_| ApiError::Network("FormData unavailable".to_string()))?;
        let _ = form.append_with_str("name", name);
        let _ = form.append_with_str("email", email);
        let _ = form.append_with_str("phone_number", phone_number);
        if let Some(file) = picture {
            let _ = form.append_with_blob("profile_picture", &file);
        }

        let snapshot = self.state.api().update_profile(form).await?;

        if let Err(e) = self.state.profile_cache().store(&snapshot) {
            log::error!("❌ Error escribiendo caché tras update: {}", e);
        }
        self.state.profile.set_snapshot(Some(snapshot.clone()));
        self.state.notify_change();

        log::info!("✅ Perfil actualizado y caché sobreescrito");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::future::ready;
    use std::rc::Rc;

    fn snapshot(name: &str) -> ProfileSnapshot {
        ProfileSnapshot {
            name: name.into(),
            email: "ana@x.io".into(),
            phone_number: None,
            profile_picture: None,
        }
    }

    fn counting_fetch(
        hits: &Rc<Cell<usize>>,
        result: Result<ProfileSnapshot, ApiError>,
    ) -> impl FnOnce() -> std::future::Ready<Result<ProfileSnapshot, ApiError>> {
        let hits = hits.clone();
        move || {
            hits.set(hits.get() + 1);
            ready(result)
        }
    }

    #[test]
    fn warm_cache_read_makes_zero_fetches() {
        let state = AppState::new(MemoryStorage::new());
        let vm = ProfileViewModel::new(state.clone());
        let hits = Rc::new(Cell::new(0));

        // Caché frío: el primer read sí fetchea
        block_on(vm.get_profile_via(false, counting_fetch(&hits, Ok(snapshot("Ana"))))).unwrap();
        assert_eq!(hits.get(), 1);

        // Caché caliente sin force: cero red, vuelve la copia guardada
        let got =
            block_on(vm.get_profile_via(false, counting_fetch(&hits, Ok(snapshot("Otra")))))
                .unwrap();
        assert_eq!(hits.get(), 1);
        assert_eq!(got.name, "Ana");
    }

    #[test]
    fn forced_read_always_fetches() {
        let state = AppState::new(MemoryStorage::new());
        let vm = ProfileViewModel::new(state.clone());
        let hits = Rc::new(Cell::new(0));

        block_on(vm.get_profile_via(true, counting_fetch(&hits, Ok(snapshot("Ana"))))).unwrap();
        block_on(vm.get_profile_via(true, counting_fetch(&hits, Ok(snapshot("Ana v2")))))
            .unwrap();

        assert_eq!(hits.get(), 2);
        // El último fetch sobreescribió la entrada durable
        assert_eq!(state.profile_cache().cached().unwrap().name, "Ana v2");
    }

    #[test]
    fn failed_fetch_leaves_cache_untouched() {
        let state = AppState::new(MemoryStorage::new());
        let vm = ProfileViewModel::new(state.clone());
        let hits = Rc::new(Cell::new(0));

        block_on(vm.get_profile_via(false, counting_fetch(&hits, Ok(snapshot("Ana"))))).unwrap();

        let err = block_on(vm.get_profile_via(
            true,
            counting_fetch(&hits, Err(ApiError::Network("timed out".into()))),
        ))
        .unwrap_err();

        assert_eq!(err, ApiError::Network("timed out".into()));
        // Stale-but-available: la copia anterior sigue sirviendo
        assert_eq!(state.profile_cache().cached().unwrap().name, "Ana");
        assert_eq!(
            state.profile.error().as_deref(),
            Some("Network error: timed out")
        );
    }
}
