// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use crate::dom::{
    append_child, create_element, input_value, on_click, set_attribute, set_class_name,
    ElementBuilder,
};
use crate::state::{AppState, SessionPhase, ToastKind};
use crate::viewmodels::{AuthViewModel, ResetViewModel};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?
        .class("login-screen")
        .build();

    let container = ElementBuilder::new("div")?
        .class("login-container")
        .build();

    // Header
    let header = ElementBuilder::new("div")?
        .class("login-header")
        .build();
    let title = ElementBuilder::new("h1")?
        .text("Workforce Console")
        .build();
    let subtitle = ElementBuilder::new("p")?
        .text("Sign in to your facility")
        .build();
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let email_group = create_input_group("login-email", "Email", "email", "Enter your email")?;
    let password_group =
        create_input_group("login-password", "Password", "password", "Enter your password")?;

    let authenticating = state.session.phase() == SessionPhase::Authenticating;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text(if authenticating { "Signing in..." } else { "Sign in" })
        .build();
    if authenticating {
        set_attribute(&submit_btn, "disabled", "true")?;
    }

    // Submit: el viewmodel valida, autentica y redirige por rol
    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let email = input_value("login-email");
            let password = input_value("login-password");

            let state = state.clone();
            spawn_local(async move {
                let vm = AuthViewModel::new(state.clone());
                if let Err(err) = vm.login(&email, &password).await {
                    log::error!("❌ Login falló: {}", err);
                    state.show_toast(err.to_string(), ToastKind::Error);
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit_btn)?;

    // Forgot password: abre el modal del flujo de reset
    let forgot_link = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link forgot-password")
        .text("Forgot password?")
        .build();
    {
        let state = state.clone();
        on_click(&forgot_link, move |_| {
            ResetViewModel::new(state.clone()).open_modal();
        })?;
    }

    append_child(&container, &header)?;
    append_child(&container, &form)?;
    append_child(&container, &forgot_link)?;
    append_child(&screen, &container)?;

    Ok(screen)
}

/// Helper para crear form group con label + input
fn create_input_group(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_attribute(&input, "placeholder", placeholder)?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}
