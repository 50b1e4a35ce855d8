// ============================================================================
// REQUEST GUARD - Descarte de respuestas tardías por entidad
// ============================================================================
// Cada fetch toma un token monotónico; al resolver, solo se aplica al
// estado si su token sigue siendo el vigente. Así un dispatch repetido
// rápido no deja que una respuesta vieja pise a una más nueva.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone)]
pub struct RequestGuard {
    current: Rc<Cell<u64>>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self {
            current: Rc::new(Cell::new(0)),
        }
    }

    /// Registrar un request nuevo; invalida todos los anteriores.
    pub fn begin(&self) -> u64 {
        let token = self.current.get() + 1;
        self.current.set(token);
        token
    }

    /// ¿Sigue siendo este el request vigente?
    pub fn is_current(&self, token: u64) -> bool {
        self.current.get() == token
    }
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_wins() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();

        // La respuesta del primer request llega tarde: se descarta
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn single_request_is_current() {
        let guard = RequestGuard::new();
        let token = guard.begin();
        assert!(guard.is_current(token));
    }
}
