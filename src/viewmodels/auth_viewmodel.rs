// ============================================================================
// AUTH VIEWMODEL - Login, logout y restauración de sesión
// ============================================================================
// Secuencia del login: credenciales → AUTHENTICATED → persistir token/rol
// → refresh FORZADO del caché de perfil (nunca servir perfil pre-login)
// → redirección por rol.
// ============================================================================

use crate::models::Role;
use crate::services::{ApiClient, ApiError};
use crate::state::{AppState, Route, ToastKind};
use crate::viewmodels::ProfileViewModel;
use wasm_bindgen_futures::spawn_local;

pub struct AuthViewModel {
    state: AppState,
}

impl AuthViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Login completo. Devuelve la ruta de redirección por rol.
    /// En fallo la sesión queda ANONYMOUS y el mensaje del servidor
    /// se propaga tal cual.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route, ApiError> {
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        self.state.session.begin_login();
        self.state.notify_change();

        // El login no lleva bearer todavía
        let api = ApiClient::new(None);
        let data = match api.login(email, password).await {
            Ok(data) => data,
            Err(e) => {
                self.state.session.fail_login();
                self.state.notify_change();
                return Err(e);
            }
        };

        let role = data.user.role();

        // Persistir credenciales antes de disparar nada autenticado
        if let Err(e) = self.state.credential_store().persist_login(&data) {
            log::error!("❌ Error persistiendo credenciales: {}", e);
        }
        self.state
            .session
            .complete_login(data.token.clone(), data.user.clone());

        // Refresh FORZADO del perfil: el caché no puede servir datos
        // de un usuario anterior al login.
        let profile_vm = ProfileViewModel::new(self.state.clone());
        if let Err(e) = profile_vm.get_profile(true).await {
            // Un perfil que no carga no tumba el login
            log::warn!("⚠️ Refresh de perfil post-login falló: {}", e);
        }

        let route = Route::for_role(role);
        self.state.set_route(route);
        self.state.notify_change();

        log::info!("✅ Login exitoso, redirigiendo a {:?}", route);
        Ok(route)
    }

    /// Logout: limpieza local síncrona primero, invalidación remota
    /// best-effort después. El logout local nunca falla por la red.
    pub fn logout(&self) {
        // Capturar el token antes de limpiarlo
        let api = self.state.api();

        self.state.force_logout();

        spawn_local(async move {
            api.logout().await;
        });
    }

    /// Restaurar sesión desde storage al arrancar la app.
    /// Devuelve true si había una sesión válida.
    pub fn restore_session(&self) -> bool {
        let store = self.state.credential_store();
        let (token, user) = match (store.token(), store.user()) {
            (Some(token), Some(user)) => (token, user),
            _ => return false,
        };

        log::info!("💾 Sesión encontrada en storage, restaurando...");

        // El rol persistido manda; si falta, se deriva del user guardado
        let role: Role = store.role().unwrap_or_else(|| user.role());
        self.state.session.complete_login(token, user);
        self.state.set_route(Route::for_role(role));

        // El perfil cacheado alcanza para pintar; no se fuerza red aquí
        if let Some(snapshot) = self.state.profile_cache().cached() {
            self.state.profile.set_snapshot(Some(snapshot));
        }
        true
    }

    /// Manejo común de un 401: terminación forzada de la sesión.
    /// Devuelve true si el error era un Unauthorized ya manejado.
    pub fn handle_unauthorized(&self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }
        self.state.force_logout();
        self.state
            .show_toast(error.to_string(), ToastKind::Error);
        true
    }
}
