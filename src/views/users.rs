// ============================================================================
// USERS VIEW - Directorio paginado con búsqueda (solo admin)
// ============================================================================

use crate::dom::{
    append_child, create_element, input_value, on_click, set_attribute, set_class_name,
    ElementBuilder,
};
use crate::models::UsersQuery;
use crate::state::{AppState, ToastKind};
use crate::viewmodels::{AuthViewModel, UsersViewModel};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub fn render_users(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("users-view")
        .build();

    let title = ElementBuilder::new("h2")?
        .text("Users")
        .build();
    append_child(&container, &title)?;

    // Barra de búsqueda
    let search_bar = ElementBuilder::new("div")?
        .class("users-search")
        .build();
    let search_input = create_element("input")?;
    set_attribute(&search_input, "type", "text")?;
    set_attribute(&search_input, "id", "users-search")?;
    set_attribute(&search_input, "placeholder", "Search by name or email...")?;
    set_attribute(&search_input, "value", &state.users.query().search)?;
    set_class_name(&search_input, "form-input");
    append_child(&search_bar, &search_input)?;

    let search_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Search")
        .build();
    {
        let state = state.clone();
        on_click(&search_btn, move |_| {
            let query = UsersQuery {
                search: input_value("users-search"),
                page: 1,
                ..state.users.query()
            };
            dispatch_load(&state, query);
        })?;
    }
    append_child(&search_bar, &search_btn)?;
    append_child(&container, &search_bar)?;

    // Carga inicial: page None significa que nunca se fetcheó
    if state.users.page().is_none() && !state.users.is_loading() {
        let state_clone = state.clone();
        let query = state.users.query();
        spawn_local(async move {
            load_with_error_handling(&state_clone, query).await;
        });
    }

    if state.users.is_loading() {
        let loading = ElementBuilder::new("p")?
            .class("users-loading")
            .text("⏳ Loading users...")
            .build();
        append_child(&container, &loading)?;
        return Ok(container);
    }

    let page = match state.users.page() {
        Some(page) => page,
        None => return Ok(container),
    };

    if page.users.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("users-empty")
            .text("No users found")
            .build();
        append_child(&container, &empty)?;
        return Ok(container);
    }

    let table = create_element("table")?;
    set_class_name(&table, "users-table");

    let thead = create_element("thead")?;
    let head_row = create_element("tr")?;
    for col in ["Name", "Email", "Role"] {
        let th = ElementBuilder::new("th")?.text(col).build();
        append_child(&head_row, &th)?;
    }
    append_child(&thead, &head_row)?;
    append_child(&table, &thead)?;

    let tbody = create_element("tbody")?;
    for user in &page.users {
        let row = create_element("tr")?;
        append_child(&row, &ElementBuilder::new("td")?.text(&user.name).build())?;
        append_child(&row, &ElementBuilder::new("td")?.text(&user.email).build())?;
        append_child(
            &row,
            &ElementBuilder::new("td")?
                .text(user.role.as_deref().unwrap_or("-"))
                .build(),
        )?;
        append_child(&tbody, &row)?;
    }
    append_child(&table, &tbody)?;
    append_child(&container, &table)?;

    // Paginación
    let pager = ElementBuilder::new("div")?
        .class("users-pager")
        .build();

    let total_pages = page.total_pages();

    let prev_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small")
        .text("Prev")
        .build();
    if page.page <= 1 {
        set_attribute(&prev_btn, "disabled", "true")?;
    } else {
        let state = state.clone();
        let target = page.page - 1;
        on_click(&prev_btn, move |_| {
            let query = UsersQuery {
                page: target,
                ..state.users.query()
            };
            dispatch_load(&state, query);
        })?;
    }
    append_child(&pager, &prev_btn)?;

    let label = ElementBuilder::new("span")?
        .class("pager-label")
        .text(&format!("Page {} of {}", page.page, total_pages))
        .build();
    append_child(&pager, &label)?;

    let next_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small")
        .text("Next")
        .build();
    if page.page >= total_pages {
        set_attribute(&next_btn, "disabled", "true")?;
    } else {
        let state = state.clone();
        let target = page.page + 1;
        on_click(&next_btn, move |_| {
            let query = UsersQuery {
                page: target,
                ..state.users.query()
            };
            dispatch_load(&state, query);
        })?;
    }
    append_child(&pager, &next_btn)?;
    append_child(&container, &pager)?;

    Ok(container)
}

fn dispatch_load(state: &AppState, query: UsersQuery) {
    let state = state.clone();
    spawn_local(async move {
        load_with_error_handling(&state, query).await;
    });
}

async fn load_with_error_handling(state: &AppState, query: UsersQuery) {
    let vm = UsersViewModel::new(state.clone());
    if let Err(err) = vm.load(query).await {
        if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
            state.show_toast(err.to_string(), ToastKind::Error);
        }
    }
}
