// ============================================================================
// HEADER VIEW - Barra superior con navegación y logout
// ============================================================================

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::{AppState, Route};
use crate::viewmodels::AuthViewModel;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .build();

    let title = ElementBuilder::new("h1")?
        .text("Workforce Console")
        .build();
    append_child(&header, &title)?;

    let nav = ElementBuilder::new("nav")?
        .class("header-nav")
        .build();

    // Home lleva al dashboard que corresponde al rol de la sesión
    let home_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-nav")
        .text("Home")
        .build();
    {
        let state = state.clone();
        on_click(&home_btn, move |_| {
            if let Some(role) = state.session.role() {
                state.set_route(Route::for_role(role));
                state.notify_change();
            }
        })?;
    }
    append_child(&nav, &home_btn)?;

    let profile_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-nav")
        .text("Profile")
        .build();
    {
        let state = state.clone();
        on_click(&profile_btn, move |_| {
            state.set_route(Route::Profile);
            state.notify_change();
        })?;
    }
    append_child(&nav, &profile_btn)?;

    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-nav btn-logout")
        .text("Logout")
        .build();
    {
        let state = state.clone();
        on_click(&logout_btn, move |_| {
            log::info!("👋 Logout iniciado");
            AuthViewModel::new(state.clone()).logout();
        })?;
    }
    append_child(&nav, &logout_btn)?;

    append_child(&header, &nav)?;
    Ok(header)
}
