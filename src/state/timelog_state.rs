// ============================================================================
// TIMELOG STATE - Lista de asistencia en memoria (nunca persistida)
// ============================================================================
// La lista se reemplaza entera con cada refetch autoritativo; no hay
// parches optimistas locales.
// ============================================================================

use crate::models::AttendanceRecord;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct TimelogState {
    records: Rc<RefCell<Vec<AttendanceRecord>>>,
    loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
    fetched: Rc<RefCell<bool>>,
    /// id del registro en edición inline, si hay uno
    editing_id: Rc<RefCell<Option<i64>>>,
}

impl TimelogState {
    pub fn new() -> Self {
        Self {
            records: Rc::new(RefCell::new(Vec::new())),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
            fetched: Rc::new(RefCell::new(false)),
            editing_id: Rc::new(RefCell::new(None)),
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        *self.editing_id.borrow()
    }

    pub fn set_editing_id(&self, id: Option<i64>) {
        *self.editing_id.borrow_mut() = id;
    }

    /// true una vez que hubo al menos un fetch (exitoso o no); la vista
    /// usa esto para disparar la carga inicial una sola vez.
    pub fn was_fetched(&self) -> bool {
        *self.fetched.borrow()
    }

    pub fn mark_fetched(&self) {
        *self.fetched.borrow_mut() = true;
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.borrow().clone()
    }

    /// Reemplazo completo con la verdad del servidor.
    pub fn replace(&self, records: Vec<AttendanceRecord>) {
        *self.records.borrow_mut() = records;
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
        self.set_loading(false);
        self.set_error(None);
        *self.fetched.borrow_mut() = false;
        *self.editing_id.borrow_mut() = None;
    }
}

impl Default for TimelogState {
    fn default() -> Self {
        Self::new()
    }
}
