// ============================================================================
// RESET MODAL VIEW - Flujo de reset de contraseña en 3 pasos
// ============================================================================
// Paso 1: email. Paso 2: código con countdown de 120s (al expirar, el
// submit se rechaza localmente y aparece "Send new code"). Paso 3:
// nueva contraseña + confirmación.
// ============================================================================

use crate::dom::{
    append_child, create_element, input_value, on_click, set_attribute, set_class_name,
    ElementBuilder,
};
use crate::state::{AppState, ResetStep, ToastKind};
use crate::viewmodels::ResetViewModel;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub fn render_reset_modal(state: &AppState) -> Result<Element, JsValue> {
    let modal = ElementBuilder::new("div")?
        .class("reset-modal")
        .build();

    let content = ElementBuilder::new("div")?
        .class("reset-modal-content")
        .build();

    // Header con botón de cierre
    let header = ElementBuilder::new("div")?
        .class("reset-modal-header")
        .build();
    let title = ElementBuilder::new("h3")?
        .text("Reset password")
        .build();
    let close_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-close")
        .text("✕")
        .build();
    {
        let state = state.clone();
        on_click(&close_btn, move |_| {
            ResetViewModel::new(state.clone()).close_modal();
        })?;
    }
    append_child(&header, &title)?;
    append_child(&header, &close_btn)?;
    append_child(&content, &header)?;

    let step = state.reset.borrow().step();
    let body = match step {
        ResetStep::EmailEntry => render_email_step(state)?,
        ResetStep::CodeEntry => render_code_step(state)?,
        ResetStep::NewPasswordEntry => render_password_step(state)?,
        // Done cierra el modal desde el viewmodel; esto no se muestra
        ResetStep::Done => ElementBuilder::new("div")?.build(),
    };
    append_child(&content, &body)?;

    append_child(&modal, &content)?;
    Ok(modal)
}

/// Paso 1: pedir el email
fn render_email_step(state: &AppState) -> Result<Element, JsValue> {
    let step = ElementBuilder::new("div")?
        .class("reset-step")
        .build();

    let hint = ElementBuilder::new("p")?
        .class("reset-hint")
        .text("Enter your email and we will send you a verification code.")
        .build();
    append_child(&step, &hint)?;

    let input = labeled_input("reset-email", "Email", "email", "Enter your email")?;
    append_child(&step, &input)?;

    let send_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Send code")
        .build();
    {
        let state = state.clone();
        on_click(&send_btn, move |_| {
            let email = input_value("reset-email");
            let state = state.clone();
            spawn_local(async move {
                let vm = ResetViewModel::new(state.clone());
                if let Err(err) = vm.submit_email(&email).await {
                    state.show_toast(err.to_string(), ToastKind::Error);
                }
            });
        })?;
    }
    append_child(&step, &send_btn)?;

    Ok(step)
}

/// Paso 2: código + countdown
fn render_code_step(state: &AppState) -> Result<Element, JsValue> {
    let step = ElementBuilder::new("div")?
        .class("reset-step")
        .build();

    let (remaining, expired) = {
        let flow = state.reset.borrow();
        (flow.remaining_secs(), flow.is_expired())
    };

    // Countdown o aviso de expiración
    if expired {
        let notice = ElementBuilder::new("p")?
            .class("reset-countdown expired")
            .text("Code has expired")
            .build();
        append_child(&step, &notice)?;
    } else {
        // El ticker actualiza este texto in-place para no recrear el
        // input del código en cada segundo
        let countdown = ElementBuilder::new("p")?
            .id("reset-countdown")?
            .class("reset-countdown")
            .text(&format!("Code expires in {}s", remaining))
            .build();
        append_child(&step, &countdown)?;
    }

    let input = labeled_input("reset-code", "Verification code", "text", "Enter the code")?;
    append_child(&step, &input)?;

    let verify_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Verify code")
        .build();
    {
        let state = state.clone();
        on_click(&verify_btn, move |_| {
            let code = input_value("reset-code");
            let state = state.clone();
            spawn_local(async move {
                let vm = ResetViewModel::new(state.clone());
                if let Err(err) = vm.submit_code(&code).await {
                    state.show_toast(err.to_string(), ToastKind::Error);
                }
            });
        })?;
    }
    append_child(&step, &verify_btn)?;

    // Con el código vencido la única salida es pedir uno nuevo
    if expired {
        let resend_btn = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-secondary")
            .text("Send new code")
            .build();
        {
            let state = state.clone();
            on_click(&resend_btn, move |_| {
                let state = state.clone();
                spawn_local(async move {
                    let vm = ResetViewModel::new(state.clone());
                    if let Err(err) = vm.request_new_code().await {
                        state.show_toast(err.to_string(), ToastKind::Error);
                    }
                });
            })?;
        }
        append_child(&step, &resend_btn)?;
    }

    Ok(step)
}

/// Paso 3: nueva contraseña + confirmación
fn render_password_step(state: &AppState) -> Result<Element, JsValue> {
    let step = ElementBuilder::new("div")?
        .class("reset-step")
        .build();

    let password =
        labeled_input("reset-password", "New password", "password", "At least 8 characters")?;
    let confirm = labeled_input(
        "reset-password-confirm",
        "Confirm password",
        "password",
        "Repeat the password",
    )?;
    append_child(&step, &password)?;
    append_child(&step, &confirm)?;

    let save_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Update password")
        .build();
    {
        let state = state.clone();
        on_click(&save_btn, move |_| {
            let password = input_value("reset-password");
            let confirmation = input_value("reset-password-confirm");
            let state = state.clone();
            spawn_local(async move {
                let vm = ResetViewModel::new(state.clone());
                if let Err(err) = vm.submit_new_password(&password, &confirmation).await {
                    state.show_toast(err.to_string(), ToastKind::Error);
                }
            });
        })?;
    }
    append_child(&step, &save_btn)?;

    Ok(step)
}

fn labeled_input(
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
    set_attribute(&input, "placeholder", placeholder)?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}
