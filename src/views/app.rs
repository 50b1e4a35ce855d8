// ============================================================================
// APP VIEW - Composición raíz por fase de sesión y ruta
// ============================================================================

use crate::dom::{append_child, ElementBuilder};
use crate::state::{AppState, Route, SessionPhase};
use crate::views::{header, login, profile, reset_modal, timelogs, toast, users};
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Renderizar el árbol completo. Se llama en cada notify_change().
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let root = ElementBuilder::new("div")?
        .class("app")
        .build();

    match state.session.phase() {
        SessionPhase::Anonymous | SessionPhase::Authenticating => {
            append_child(&root, &login::render_login(state)?)?;

            if *state.show_reset_modal.borrow() {
                append_child(&root, &reset_modal::render_reset_modal(state)?)?;
            }
        }
        SessionPhase::Authenticated => {
            append_child(&root, &header::render_header(state)?)?;

            let content = ElementBuilder::new("main")?
                .class("app-content")
                .build();

            match state.route() {
                // Dashboard de admin: directorio de usuarios + timelogs
                Route::Dashboard => {
                    append_child(&content, &users::render_users(state)?)?;
                    append_child(&content, &timelogs::render_timelogs(state)?)?;
                }
                Route::ClientDashboard | Route::CustomerDashboard => {
                    append_child(&content, &timelogs::render_timelogs(state)?)?;
                }
                Route::Profile => {
                    append_child(&content, &profile::render_profile(state)?)?;
                }
            }

            append_child(&root, &content)?;
        }
    }

    if let Some(toast_el) = toast::render_toast(state)? {
        append_child(&root, &toast_el)?;
    }

    Ok(root)
}
