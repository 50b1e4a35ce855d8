// ============================================================================
// APP - Aplicación principal
// ============================================================================

use crate::dom::get_element_by_id;
use crate::state::AppState;
use crate::utils::LocalStorageBackend;
use crate::viewmodels::AuthViewModel;
use crate::views::render_app;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Aplicación principal: monta el árbol en #app y re-renderiza entero
/// con cada cambio de estado.
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(LocalStorageBackend::new());

        // Restaurar sesión desde storage si existe
        {
            let auth = AuthViewModel::new(state.clone());
            if auth.restore_session() {
                log::info!("✅ Sesión restaurada desde storage");
            }
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move || {
            // Timeout(0) batchea ráfagas de notificaciones en un solo render
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        let tree = render_app(&self.state)?;

        self.root.set_inner_html("");
        self.root.append_child(&tree)?;
        Ok(())
    }
}
