// ============================================================================
// USERS VIEWMODEL - Directorio paginado de usuarios
// ============================================================================

use crate::models::UsersQuery;
use crate::services::ApiError;
use crate::state::AppState;

pub struct UsersViewModel {
    state: AppState,
}

impl UsersViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Cargar una página del directorio. Dispatches rápidos repetidos
    /// (tipeo en el buscador) solo aplican la última respuesta.
    pub async fn load(&self, query: UsersQuery) -> Result<(), ApiError> {
        let token = self.state.users_guard.begin();
        self.state.users.set_query(query.clone());
        self.state.users.set_loading(true);
        self.state.notify_change();

        match self.state.api().get_users(&query).await {
            Ok(page) => {
                if !self.state.users_guard.is_current(token) {
                    log::warn!("🔄 Página de usuarios obsoleta descartada");
                    return Ok(());
                }
                log::info!("👥 Usuarios recibidos: {} (total {})", page.users.len(), page.total);
                self.state.users.set_page(Some(page));
                self.state.users.set_loading(false);
                self.state.notify_change();
                Ok(())
            }
            Err(e) => {
                if self.state.users_guard.is_current(token) {
                    self.state.users.set_loading(false);
                    self.state.notify_change();
                }
                Err(e)
            }
        }
    }
}
