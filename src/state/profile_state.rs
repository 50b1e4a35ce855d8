// ============================================================================
// PROFILE STATE - Snapshot de perfil en memoria + flags de carga
// ============================================================================

use crate::models::ProfileSnapshot;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct ProfileState {
    snapshot: Rc<RefCell<Option<ProfileSnapshot>>>,
    loading: Rc<RefCell<bool>>,
    error: Rc<RefCell<Option<String>>>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self {
            snapshot: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn snapshot(&self) -> Option<ProfileSnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn set_snapshot(&self, snapshot: Option<ProfileSnapshot>) {
        *self.snapshot.borrow_mut() = snapshot;
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
        self.set_snapshot(None);
        self.set_loading(false);
        self.set_error(None);
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new()
    }
}
