// ============================================================================
// PROFILE VIEW - Edición de perfil con foto
// ============================================================================

use crate::dom::{
    append_child, create_element, input_file, input_value, on_click, set_attribute,
    set_class_name, ElementBuilder,
};
use crate::state::{AppState, ToastKind};
use crate::viewmodels::{AuthViewModel, ProfileViewModel};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub fn render_profile(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("profile-view")
        .build();

    let title = ElementBuilder::new("h2")?
        .text("My profile")
        .build();
    append_child(&container, &title)?;

    // Carga inicial cuando el caché no dejó snapshot (vacío o corrupto);
    // el gate de error evita un loop de refetch si el servidor falla
    if state.profile.snapshot().is_none()
        && !state.profile.is_loading()
        && state.profile.error().is_none()
    {
        let state_clone = state.clone();
        spawn_local(async move {
            let vm = ProfileViewModel::new(state_clone.clone());
            if let Err(err) = vm.get_profile(false).await {
                if !AuthViewModel::new(state_clone.clone()).handle_unauthorized(&err) {
                    state_clone.show_toast(err.to_string(), ToastKind::Error);
                }
            }
        });
    }

    if state.profile.is_loading() {
        let loading = ElementBuilder::new("p")?
            .class("profile-loading")
            .text("⏳ Loading profile...")
            .build();
        append_child(&container, &loading)?;
        return Ok(container);
    }

    // Con el fetch fallido se sigue mostrando el último snapshot bueno
    if let Some(error) = state.profile.error() {
        let banner = ElementBuilder::new("p")?
            .class("profile-error")
            .text(&error)
            .build();
        append_child(&container, &banner)?;
    }

    let snapshot = state.profile.snapshot().unwrap_or_default();

    // Foto actual
    if let Some(url) = &snapshot.profile_picture {
        let picture = create_element("img")?;
        set_attribute(&picture, "src", url)?;
        set_attribute(&picture, "alt", "Profile picture")?;
        set_class_name(&picture, "profile-picture");
        append_child(&container, &picture)?;
    }

    let form = ElementBuilder::new("div")?
        .class("profile-form")
        .build();

    append_child(
        &form,
        &prefilled_input("profile-name", "Name", "text", &snapshot.name)?,
    )?;
    append_child(
        &form,
        &prefilled_input("profile-email", "Email", "email", &snapshot.email)?,
    )?;
    append_child(
        &form,
        &prefilled_input(
            "profile-phone",
            "Phone number",
            "tel",
            snapshot.phone_number.as_deref().unwrap_or(""),
        )?,
    )?;

    // Input de archivo para la foto
    let picture_group = ElementBuilder::new("div")?
        .class("form-group")
        .build();
    let picture_label = ElementBuilder::new("label")?
        .attr("for", "profile-picture-input")?
        .text("Profile picture")
        .build();
    let picture_input = create_element("input")?;
    set_attribute(&picture_input, "type", "file")?;
    set_attribute(&picture_input, "id", "profile-picture-input")?;
    set_attribute(&picture_input, "accept", "image/*")?;
    append_child(&picture_group, &picture_label)?;
    append_child(&picture_group, &picture_input)?;
    append_child(&form, &picture_group)?;

    // Guardar: update multipart + write-through del caché
    let save_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Save changes")
        .build();
    {
        let state = state.clone();
        on_click(&save_btn, move |_| {
            let name = input_value("profile-name");
            let email = input_value("profile-email");
            let phone = input_value("profile-phone");
            let picture = input_file("profile-picture-input");

            let state = state.clone();
            spawn_local(async move {
                let vm = ProfileViewModel::new(state.clone());
                match vm.update_profile(&name, &email, &phone, picture).await {
                    Ok(_) => state.show_toast("Profile updated", ToastKind::Success),
                    Err(err) => {
                        if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
                            state.show_toast(err.to_string(), ToastKind::Error);
                        }
                    }
                }
            });
        })?;
    }
    append_child(&form, &save_btn)?;

    // Refresh forzado: ignora el caché y trae la verdad del servidor
    let refresh_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Refresh")
        .build();
    {
        let state = state.clone();
        on_click(&refresh_btn, move |_| {
            let state = state.clone();
            spawn_local(async move {
                let vm = ProfileViewModel::new(state.clone());
                if let Err(err) = vm.get_profile(true).await {
                    if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
                        state.show_toast(err.to_string(), ToastKind::Error);
                    }
                }
            });
        })?;
    }
    append_child(&form, &refresh_btn)?;

    append_child(&container, &form)?;
    Ok(container)
}

fn prefilled_input(
    id: &str,
    label_text: &str,
    input_type: &str,
    value: &str,
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
    set_attribute(&input, "value", value)?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}
