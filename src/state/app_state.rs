// ============================================================================
// APP STATE - Estado global de la aplicación (inyectado, no ambiente)
// ============================================================================
// Se construye explícitamente en App::new() con el storage backend
// inyectado, y se pasa a vistas y viewmodels. Nada de estado global
// mutable a nivel de módulo.
// ============================================================================

use crate::config::TOAST_DISMISS_MS;
use crate::models::Role;
use crate::services::{ApiClient, CredentialStore, ProfileCache};
use crate::state::{
    ProfileState, RequestGuard, ResetFlow, SessionState, TimelogState, ToastKind, ToastState,
    UsersState,
};
use crate::utils::storage::StorageBackend;
use std::cell::RefCell;
use std::rc::Rc;

/// Ruta activa tras el login (seleccionada por rol).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Route {
    Dashboard,
    ClientDashboard,
    CustomerDashboard,
    Profile,
}

impl Route {
    /// Destino post-login según el rol del usuario.
    pub fn for_role(role: Role) -> Self {
        match role.redirect_target() {
            "dashboard" => Route::Dashboard,
            "client-dashboard" => Route::ClientDashboard,
            _ => Route::CustomerDashboard,
        }
    }
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub profile: ProfileState,
    pub timelogs: TimelogState,
    pub users: UsersState,
    pub toasts: ToastState,
    pub reset: Rc<RefCell<ResetFlow>>,

    // UI State
    pub route: Rc<RefCell<Route>>,
    pub show_reset_modal: Rc<RefCell<bool>>,

    // Interval del countdown de reset; vive acá porque los viewmodels
    // se crean y descartan por evento
    pub reset_ticker: Rc<RefCell<Option<gloo_timers::callback::Interval>>>,

    // Guards por entidad: las respuestas tardías se descartan
    pub profile_guard: RequestGuard,
    pub timelogs_guard: RequestGuard,
    pub users_guard: RequestGuard,

    // Storage durable inyectado (localStorage real o doble de prueba)
    storage: Rc<dyn StorageBackend>,

    // Reactivity: callbacks para notificar cambios
    change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación con el storage inyectado.
    pub fn new(storage: Rc<dyn StorageBackend>) -> Self {
        Self {
            session: SessionState::new(),
            profile: ProfileState::new(),
            timelogs: TimelogState::new(),
            users: UsersState::new(),
            toasts: ToastState::new(),
            reset: Rc::new(RefCell::new(ResetFlow::new())),

            route: Rc::new(RefCell::new(Route::CustomerDashboard)),
            show_reset_modal: Rc::new(RefCell::new(false)),
            reset_ticker: Rc::new(RefCell::new(None)),

            profile_guard: RequestGuard::new(),
            timelogs_guard: RequestGuard::new(),
            users_guard: RequestGuard::new(),

            storage,
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.storage.clone())
    }

    pub fn profile_cache(&self) -> ProfileCache {
        ProfileCache::new(self.storage.clone())
    }

    /// Cliente API con el bearer token vigente de la sesión.
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.session.token())
    }

    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
    }

    /// Suscribirse a cambios de estado (re-render automático).
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers
            .borrow_mut()
            .push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers.
    pub fn notify_change(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }

    /// Toast con auto-dismiss a los 3 segundos.
    pub fn show_toast(&self, message: impl Into<String>, kind: ToastKind) {
        let seq = self.toasts.show(message.into(), kind);
        self.notify_change();

        let toasts = self.toasts.clone();
        let state = self.clone();
        gloo_timers::callback::Timeout::new(TOAST_DISMISS_MS, move || {
            toasts.dismiss(seq);
            state.notify_change();
        })
        .forget();
    }

    /// Terminación forzada de sesión (logout local o 401):
    /// storage limpio primero, después el estado en memoria.
    pub fn force_logout(&self) {
        self.credential_store().clear_all();
        self.session.terminate();
        self.profile.clear();
        self.timelogs.clear();
        self.users.clear();
        self.toasts.clear();
        *self.reset.borrow_mut() = ResetFlow::new();
        *self.reset_ticker.borrow_mut() = None;
        *self.show_reset_modal.borrow_mut() = false;
        self.notify_change();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginData, UserSummary};
    use crate::utils::storage::MemoryStorage;

    fn authed_state() -> AppState {
        let state = AppState::new(MemoryStorage::new());
        let data = LoginData {
            token: "tok".into(),
            user: UserSummary {
                id: 1,
                name: "Ana".into(),
                email: "ana@x.io".into(),
                role: "admin".into(),
            },
        };
        state.credential_store().persist_login(&data).unwrap();
        state.session.complete_login(data.token, data.user);
        state
    }

    #[test]
    fn route_for_role_matches_redirect_targets() {
        assert_eq!(Route::for_role(Role::Admin), Route::Dashboard);
        assert_eq!(Route::for_role(Role::Team), Route::ClientDashboard);
        assert_eq!(Route::for_role(Role::Customer), Route::CustomerDashboard);
    }

    #[test]
    fn force_logout_clears_storage_and_memory() {
        let state = authed_state();
        state
            .profile_cache()
            .store(&crate::models::ProfileSnapshot {
                name: "Ana".into(),
                email: "ana@x.io".into(),
                phone_number: None,
                profile_picture: None,
            })
            .unwrap();

        state.force_logout();

        assert!(!state.session.is_authenticated());
        assert!(!state.credential_store().has_session());
        assert!(state.profile_cache().cached().is_none());
        assert!(state.timelogs.records().is_empty());
    }

    #[test]
    fn notify_change_reaches_subscribers() {
        let state = AppState::new(MemoryStorage::new());
        let hits = Rc::new(RefCell::new(0));
        {
            let hits = hits.clone();
            state.subscribe_to_changes(move || {
                *hits.borrow_mut() += 1;
            });
        }
        state.notify_change();
        state.notify_change();
        assert_eq!(*hits.borrow(), 2);
    }
}
