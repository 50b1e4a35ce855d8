// ============================================================================
// RESET VIEWMODEL - Orquestación del flujo de reset de contraseña
// ============================================================================
// El FSM puro vive en state::ResetFlow; acá solo se cablea la red y el
// Interval de un segundo del countdown. Cualquier paso fallido deja al
// usuario en el mismo paso con el error formateado.
// ============================================================================

use crate::services::{ApiClient, ApiError};
use crate::state::{AppState, ResetFlow, ToastKind};
use gloo_timers::callback::Interval;

pub struct ResetViewModel {
    state: AppState,
}

impl ResetViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn open_modal(&self) {
        *self.state.reset.borrow_mut() = ResetFlow::new();
        *self.state.show_reset_modal.borrow_mut() = true;
        self.state.notify_change();
    }

    pub fn close_modal(&self) {
        self.stop_ticker();
        *self.state.reset.borrow_mut() = ResetFlow::new();
        *self.state.show_reset_modal.borrow_mut() = false;
        self.state.notify_change();
    }

    /// Paso 1: enviar el email y arrancar el countdown de 120s.
    pub async fn submit_email(&self, email: &str) -> Result<(), ApiError> {
        if email.is_empty() {
            return Err(ApiError::Validation("Email is required".to_string()));
        }

        ApiClient::new(None).request_password_reset(email).await?;

        self.state.reset.borrow_mut().email_accepted(email.to_string());
        self.start_ticker();
        self.state.notify_change();
        Ok(())
    }

    /// Paso 2: validar el código. Si el countdown ya expiró el rechazo
    /// es local ("Code has expired") y NO se toca la red.
    pub async fn submit_code(&self, code: &str) -> Result<(), ApiError> {
        if code.is_empty() {
            return Err(ApiError::Validation("Code is required".to_string()));
        }

        // Chequeo local antes de cualquier request
        if let Err(msg) = self.state.reset.borrow().check_code_submission() {
            return Err(ApiError::Validation(msg));
        }

        let email = self.state.reset.borrow().email.clone();
        ApiClient::new(None).validate_reset_code(&email, code).await?;

        self.state.reset.borrow_mut().code_accepted(code.to_string());
        self.stop_ticker();
        self.state.notify_change();
        Ok(())
    }

    /// "Enviar código nuevo": re-pide el código y reinicia el countdown.
    pub async fn request_new_code(&self) -> Result<(), ApiError> {
        let email = self.state.reset.borrow().email.clone();
        ApiClient::new(None).request_password_reset(&email).await?;

        self.state.reset.borrow_mut().new_code_requested();
        self.start_ticker();
        self.state.notify_change();
        Ok(())
    }

    /// Paso 3: nueva contraseña (≥8 + confirmación) y cierre del modal.
    pub async fn submit_new_password(
        &self,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        if let Err(msg) = ResetFlow::check_new_password(password, confirmation) {
            return Err(ApiError::Validation(msg));
        }

        let (email, code) = {
            let flow = self.state.reset.borrow();
            (flow.email.clone(), flow.code.clone())
        };
        ApiClient::new(None)
            .reset_password(&email, &code, password, confirmation)
            .await?;

        self.state.reset.borrow_mut().password_accepted();
        self.stop_ticker();
        *self.state.show_reset_modal.borrow_mut() = false;
        self.state
            .show_toast("Password updated, you can log in now", ToastKind::Success);
        Ok(())
    }

    /// Interval de 1s que avanza el FSM y refresca el contador en pantalla.
    fn start_ticker(&self) {
        self.stop_ticker();

        let state = self.state.clone();
        let interval = Interval::new(1_000, move || {
            let became_expired = state.reset.borrow_mut().tick();
            if became_expired {
                // Expirado: el timer ya no tiene nada que hacer. Soltar
                // el Interval dentro de su propio callback es seguro,
                // wasm-bindgen difiere la liberación del closure en curso.
                *state.reset_ticker.borrow_mut() = None;
                // Re-render completo: aparece el aviso y "Send new code"
                state.notify_change();
                return;
            }
            // Solo actualizar el contador in-place; un re-render completo
            // borraría lo que el usuario tipeó en el input del código
            if let Some(el) = crate::dom::get_element_by_id("reset-countdown") {
                let remaining = state.reset.borrow().remaining_secs();
                crate::dom::set_text_content(&el, &format!("Code expires in {}s", remaining));
            }
        });
        *self.state.reset_ticker.borrow_mut() = Some(interval);
    }

    fn stop_ticker(&self) {
        // Drop del Interval cancela el timer
        *self.state.reset_ticker.borrow_mut() = None;
    }
}
