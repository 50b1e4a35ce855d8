// ============================================================================
// TOAST VIEW - Notificación transitoria en la esquina
// ============================================================================

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::AppState;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Renderizar el toast visible, si hay uno. El auto-dismiss de 3s lo
/// programa AppState::show_toast; acá solo se agrega el cierre manual.
pub fn render_toast(state: &AppState) -> Result<Option<Element>, JsValue> {
    let toast = match state.toasts.current() {
        Some(toast) => toast,
        None => return Ok(None),
    };

    let container = ElementBuilder::new("div")?
        .class(&format!("toast {}", toast.kind.css_class()))
        .build();

    let message = ElementBuilder::new("span")?
        .class("toast-message")
        .text(&toast.message)
        .build();

    let close_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("toast-close")
        .text("✕")
        .build();

    {
        let state = state.clone();
        let seq = toast.seq;
        on_click(&close_btn, move |_| {
            state.toasts.dismiss(seq);
            state.notify_change();
        })?;
    }

    append_child(&container, &message)?;
    append_child(&container, &close_btn)?;

    Ok(Some(container))
}
