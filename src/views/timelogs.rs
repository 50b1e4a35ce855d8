// ============================================================================
// TIMELOGS VIEW - Tabla de asistencia con horas derivadas
// ============================================================================
// La columna de horas se deriva SIEMPRE de start/end al renderizar;
// nunca viaja del servidor ni se guarda. Tras cada mutación la lista
// entera se refetchea, así que lo que se ve es la verdad del servidor.
// ============================================================================

use crate::dom::{
    append_child, create_element, input_value, on_click, set_attribute, set_class_name,
    ElementBuilder,
};
use crate::models::{AttendanceRecord, HoursBadge};
use crate::state::{AppState, ToastKind};
use crate::viewmodels::{AuthViewModel, TimelogViewModel};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub fn render_timelogs(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("timelogs-view")
        .build();

    let toolbar = ElementBuilder::new("div")?
        .class("timelogs-toolbar")
        .build();
    let title = ElementBuilder::new("h2")?
        .text("Timelogs")
        .build();
    append_child(&toolbar, &title)?;

    // Recarga manual
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
                load_with_error_handling(&state).await;
            });
        })?;
    }
    append_child(&toolbar, &refresh_btn)?;

    // Export CSV
    let export_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Export CSV")
        .build();
    {
        let state = state.clone();
        on_click(&export_btn, move |_| {
            let state = state.clone();
            spawn_local(async move {
                let vm = TimelogViewModel::new(state.clone());
                match vm.export_csv().await {
                    Ok(bytes) => {
                        if let Err(e) = trigger_csv_download(&bytes) {
                            log::error!("❌ Descarga de CSV falló: {:?}", e);
                            state.show_toast("CSV download failed", ToastKind::Error);
                        }
                    }
                    Err(err) => {
                        if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
                            state.show_toast(err.to_string(), ToastKind::Error);
                        }
                    }
                }
            });
        })?;
    }
    append_child(&toolbar, &export_btn)?;
    append_child(&container, &toolbar)?;

    // Carga inicial: una sola vez por sesión
    if !state.timelogs.was_fetched() && !state.timelogs.is_loading() {
        let state_clone = state.clone();
        spawn_local(async move {
            load_with_error_handling(&state_clone).await;
        });
    }

    if state.timelogs.is_loading() {
        let loading = ElementBuilder::new("p")?
            .class("timelogs-loading")
            .text("⏳ Loading timelogs...")
            .build();
        append_child(&container, &loading)?;
        return Ok(container);
    }

    if let Some(error) = state.timelogs.error() {
        let banner = ElementBuilder::new("p")?
            .class("timelogs-error")
            .text(&error)
            .build();
        append_child(&container, &banner)?;
    }

    let records = state.timelogs.records();
    if records.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("timelogs-empty")
            .text("No timelogs yet")
            .build();
        append_child(&container, &empty)?;
        return Ok(container);
    }

    let table = create_element("table")?;
    set_class_name(&table, "timelogs-table");

    let thead = create_element("thead")?;
    let head_row = create_element("tr")?;
    for col in ["Title", "Start", "End", "Hours", "Status", ""] {
        let th = ElementBuilder::new("th")?.text(col).build();
        append_child(&head_row, &th)?;
    }
    append_child(&thead, &head_row)?;
    append_child(&table, &thead)?;

    let tbody = create_element("tbody")?;
    let editing = state.timelogs.editing_id();
    for record in &records {
        let row = if editing == Some(record.id) {
            render_edit_row(state, record)?
        } else {
            render_row(state, record)?
        };
        append_child(&tbody, &row)?;
    }
    append_child(&table, &tbody)?;
    append_child(&container, &table)?;

    Ok(container)
}

/// Fila de solo lectura con el badge de horas
fn render_row(state: &AppState, record: &AttendanceRecord) -> Result<Element, JsValue> {
    let row = create_element("tr")?;

    let title_cell = ElementBuilder::new("td")?
        .text(record.title.as_deref().unwrap_or("-"))
        .build();
    let start_cell = ElementBuilder::new("td")?
        .text(record.start_time.as_deref().unwrap_or("-"))
        .build();
    let end_cell = ElementBuilder::new("td")?
        .text(record.end_time.as_deref().unwrap_or("-"))
        .build();
    append_child(&row, &title_cell)?;
    append_child(&row, &start_cell)?;
    append_child(&row, &end_cell)?;

    // Horas derivadas: N/A si falta un extremo o no parsea
    let hours_cell = create_element("td")?;
    match record.hours_worked() {
        Some(hours) => {
            let badge = ElementBuilder::new("span")?
                .class(&format!(
                    "hours-badge {}",
                    HoursBadge::from_hours(hours).css_class()
                ))
                .text(&format!("{} h", hours))
                .build();
            append_child(&hours_cell, &badge)?;
        }
        None => {
            let na = ElementBuilder::new("span")?
                .class("hours-badge hours-na")
                .text("N/A")
                .build();
            append_child(&hours_cell, &na)?;
        }
    }
    append_child(&row, &hours_cell)?;

    let status_cell = ElementBuilder::new("td")?
        .text(if record.is_already_added() {
            "Already added"
        } else {
            "Incomplete"
        })
        .build();
    append_child(&row, &status_cell)?;

    // Acciones
    let actions_cell = create_element("td")?;
    set_class_name(&actions_cell, "timelog-actions");

    let edit_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small")
        .text("Edit")
        .build();
    {
        let state = state.clone();
        let id = record.id;
        on_click(&edit_btn, move |_| {
            state.timelogs.set_editing_id(Some(id));
            state.notify_change();
        })?;
    }
    append_child(&actions_cell, &edit_btn)?;

    let delete_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small btn-danger")
        .text("Delete")
        .build();
    {
        let state = state.clone();
        let id = record.id;
        on_click(&delete_btn, move |_| {
            let state = state.clone();
            spawn_local(async move {
                let vm = TimelogViewModel::new(state.clone());
                if let Err(err) = vm.delete(id).await {
                    if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
                        state.show_toast(err.to_string(), ToastKind::Error);
                    }
                }
            });
        })?;
    }
    append_child(&actions_cell, &delete_btn)?;
    append_child(&row, &actions_cell)?;

    Ok(row)
}

/// Fila en edición inline: title/start/end como inputs
fn render_edit_row(state: &AppState, record: &AttendanceRecord) -> Result<Element, JsValue> {
    let row = create_element("tr")?;
    set_class_name(&row, "timelog-editing");

    let title_id = format!("timelog-title-{}", record.id);
    let start_id = format!("timelog-start-{}", record.id);
    let end_id = format!("timelog-end-{}", record.id);

    for (id, value) in [
        (&title_id, record.title.as_deref().unwrap_or("")),
        (&start_id, record.start_time.as_deref().unwrap_or("")),
        (&end_id, record.end_time.as_deref().unwrap_or("")),
    ] {
        let cell = create_element("td")?;
        let input = create_element("input")?;
        set_attribute(&input, "type", "text")?;
        set_attribute(&input, "id", id)?;
        set_attribute(&input, "value", value)?;
        set_class_name(&input, "form-input");
        append_child(&cell, &input)?;
        append_child(&row, &cell)?;
    }

    // Columnas de horas y status no se editan
    append_child(&row, &ElementBuilder::new("td")?.text("-").build())?;
    append_child(&row, &ElementBuilder::new("td")?.text("-").build())?;

    let actions_cell = create_element("td")?;
    set_class_name(&actions_cell, "timelog-actions");

    let save_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small btn-primary")
        .text("Save")
        .build();
    {
        let state = state.clone();
        let base = record.clone();
        on_click(&save_btn, move |_| {
            let mut updated = base.clone();
            updated.title = non_empty(input_value(&format!("timelog-title-{}", base.id)));
            updated.start_time = non_empty(input_value(&format!("timelog-start-{}", base.id)));
            updated.end_time = non_empty(input_value(&format!("timelog-end-{}", base.id)));

            let state = state.clone();
            spawn_local(async move {
                let vm = TimelogViewModel::new(state.clone());
                if let Err(err) = vm.update(&updated).await {
                    if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
                        state.show_toast(err.to_string(), ToastKind::Error);
                    }
                }
            });
        })?;
    }
    append_child(&actions_cell, &save_btn)?;

    let cancel_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-small")
        .text("Cancel")
        .build();
    {
        let state = state.clone();
        on_click(&cancel_btn, move |_| {
            state.timelogs.set_editing_id(None);
            state.notify_change();
        })?;
    }
    append_child(&actions_cell, &cancel_btn)?;
    append_child(&row, &actions_cell)?;

    Ok(row)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

async fn load_with_error_handling(state: &AppState) {
    let vm = TimelogViewModel::new(state.clone());
    if let Err(err) = vm.load().await {
        if !AuthViewModel::new(state.clone()).handle_unauthorized(&err) {
            state.show_toast(err.to_string(), ToastKind::Error);
        }
    }
}

/// Armar un Blob con los bytes y dispararle un click a un <a download>
fn trigger_csv_download(bytes: &[u8]) -> Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor = crate::dom::create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download("timelogs.csv");
    anchor.click();

    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
