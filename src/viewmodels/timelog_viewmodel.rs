// ============================================================================
// TIMELOG VIEWMODEL - CRUD de asistencia sin parches optimistas
// ============================================================================
// Tras CUALQUIER mutación se re-emite el fetch de la lista exactamente
// una vez: la vista siempre refleja la verdad del servidor, incluyendo
// los campos derivados (horas trabajadas). Los accesos de red entran
// inyectados (load_via / delete_via) para poder contarlos en tests.
// ============================================================================

use crate::models::AttendanceRecord;
use crate::services::ApiError;
use crate::state::{AppState, ToastKind};
use std::future::Future;

pub struct TimelogViewModel {
    state: AppState,
}

impl TimelogViewModel {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Fetch autoritativo de la lista, con guard anti-respuestas-tardías.
    pub async fn load(&self) -> Result<(), ApiError> {
        let api = self.state.api();
        self.load_via(move || async move { api.get_tasks().await })
            .await
    }

    async fn load_via<L, LF>(&self, fetch_list: L) -> Result<(), ApiError>
    where
        L: FnOnce() -> LF,
        LF: Future<Output = Result<Vec<AttendanceRecord>, ApiError>>,
    {
        let token = self.state.timelogs_guard.begin();
        self.state.timelogs.mark_fetched();
        self.state.timelogs.set_loading(true);
        self.state.notify_change();

        match fetch_list().await {
            Ok(records) => {
                if !self.state.timelogs_guard.is_current(token) {
                    log::warn!("🔄 Lista de timelogs obsoleta descartada");
                    return Ok(());
                }
                self.state.timelogs.replace(records);
                self.state.timelogs.set_loading(false);
                self.state.timelogs.set_error(None);
                self.state.notify_change();
                Ok(())
            }
            Err(e) => {
                if self.state.timelogs_guard.is_current(token) {
                    self.state.timelogs.set_loading(false);
                    self.state.timelogs.set_error(Some(e.to_string()));
                    self.state.notify_change();
                }
                Err(e)
            }
        }
    }

    /// Borrar un registro: un toast de éxito, un único refetch.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let api = self.state.api();
        let list_api = self.state.api();

        self.delete_via(
            move || async move { api.delete_task(id).await },
            move || async move { list_api.get_tasks().await },
        )
        .await?;

        self.state
            .show_toast("Timelog deleted", ToastKind::Success);
        Ok(())
    }

    async fn delete_via<D, DF, L, LF>(&self, delete: D, fetch_list: L) -> Result<(), ApiError>
    where
        D: FnOnce() -> DF,
        DF: Future<Output = Result<(), ApiError>>,
        L: FnOnce() -> LF,
        LF: Future<Output = Result<Vec<AttendanceRecord>, ApiError>>,
    {
        delete().await?;

        // Sin parche local: una sola recarga autoritativa
        self.load_via(fetch_list).await
    }

    /// Actualizar un registro y recargar la lista.
    pub async fn update(&self, record: &AttendanceRecord) -> Result<(), ApiError> {
        self.state.api().update_task(record).await?;

        self.state.timelogs.set_editing_id(None);
        self.state
            .show_toast("Timelog updated", ToastKind::Success);

        self.load().await
    }

    /// Bytes del CSV exportado; la vista dispara la descarga.
    pub async fn export_csv(&self) -> Result<Vec<u8>, ApiError> {
        let bytes = self.state.api().get_tasks_csv().await?;
        log::info!("📄 CSV exportado: {} bytes", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::future::ready;
    use std::rc::Rc;

    fn record(id: i64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            title: Some("Turno".into()),
            description: None,
            start_time: Some("2026-08-24 09:00:00".into()),
            end_time: Some("2026-08-24 17:00:00".into()),
            user_id: 7,
            facility_id: None,
        }
    }

    fn counting_list(
        hits: &Rc<Cell<usize>>,
        records: Vec<AttendanceRecord>,
    ) -> impl FnOnce() -> std::future::Ready<Result<Vec<AttendanceRecord>, ApiError>> {
        let hits = hits.clone();
        move || {
            hits.set(hits.get() + 1);
            ready(Ok(records))
        }
    }

    #[test]
    fn load_replaces_the_list() {
        let state = AppState::new(MemoryStorage::new());
        let vm = TimelogViewModel::new(state.clone());
        let hits = Rc::new(Cell::new(0));

        block_on(vm.load_via(counting_list(&hits, vec![record(1), record(2)]))).unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(state.timelogs.records().len(), 2);
        assert!(state.timelogs.was_fetched());
        assert!(!state.timelogs.is_loading());
    }

    #[test]
    fn delete_refetches_the_list_exactly_once() {
        let state = AppState::new(MemoryStorage::new());
        let vm = TimelogViewModel::new(state.clone());
        let list_hits = Rc::new(Cell::new(0));
        let delete_hits = Rc::new(Cell::new(0));

        let delete = {
            let hits = delete_hits.clone();
            move || {
                hits.set(hits.get() + 1);
                ready(Ok(()))
            }
        };
        block_on(vm.delete_via(delete, counting_list(&list_hits, vec![record(2)]))).unwrap();

        assert_eq!(delete_hits.get(), 1);
        assert_eq!(list_hits.get(), 1);
        assert_eq!(state.timelogs.records().len(), 1);
        assert_eq!(state.timelogs.records()[0].id, 2);
    }

    #[test]
    fn failed_delete_skips_the_refetch() {
        let state = AppState::new(MemoryStorage::new());
        let vm = TimelogViewModel::new(state.clone());
        let list_hits = Rc::new(Cell::new(0));

        let err = block_on(vm.delete_via(
            || ready(Err(ApiError::Api("Not found".into()))),
            counting_list(&list_hits, vec![]),
        ))
        .unwrap_err();

        assert_eq!(err, ApiError::Api("Not found".into()));
        assert_eq!(list_hits.get(), 0);
    }

    #[test]
    fn failed_load_keeps_the_previous_list() {
        let state = AppState::new(MemoryStorage::new());
        let vm = TimelogViewModel::new(state.clone());
        let hits = Rc::new(Cell::new(0));

        block_on(vm.load_via(counting_list(&hits, vec![record(1)]))).unwrap();

        let err = block_on(
            vm.load_via(|| ready(Err(ApiError::Network("timed out".into())))),
        )
        .unwrap_err();

        assert_eq!(err, ApiError::Network("timed out".into()));
        assert_eq!(state.timelogs.records().len(), 1);
        assert_eq!(
            state.timelogs.error().as_deref(),
            Some("Network error: timed out")
        );
    }
}
