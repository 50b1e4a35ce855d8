// ============================================================================
// USERS STATE - Página actual del directorio de usuarios
// ============================================================================

use crate::models::{UserPage, UsersQuery};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct UsersState {
    page: Rc<RefCell<Option<UserPage>>>,
    query: Rc<RefCell<UsersQuery>>,
    loading: Rc<RefCell<bool>>,
}

impl UsersState {
    pub fn new() -> Self {
        Self {
            page: Rc::new(RefCell::new(None)),
            query: Rc::new(RefCell::new(UsersQuery::default())),
            loading: Rc::new(RefCell::new(false)),
        }
    }

    pub fn page(&self) -> Option<UserPage> {
        self.page.borrow().clone()
    }

    pub fn set_page(&self, page: Option<UserPage>) {
        *self.page.borrow_mut() = page;
    }

    pub fn query(&self) -> UsersQuery {
        self.query.borrow().clone()
    }

    pub fn set_query(&self, query: UsersQuery) {
        *self.query.borrow_mut() = query;
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn clear(&self) {
        self.set_page(None);
        self.set_query(UsersQuery::default());
        self.set_loading(false);
    }
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new()
    }
}
