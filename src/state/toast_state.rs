// ============================================================================
// TOAST STATE - Notificaciones transitorias (auto-dismiss 3s)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Secuencia para que un timeout viejo no cierre un toast más nuevo.
    pub seq: u64,
}

#[derive(Clone)]
pub struct ToastState {
    current: Rc<RefCell<Option<Toast>>>,
    next_seq: Rc<RefCell<u64>>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            current: Rc::new(RefCell::new(None)),
            next_seq: Rc::new(RefCell::new(0)),
        }
    }

    pub fn current(&self) -> Option<Toast> {
        self.current.borrow().clone()
    }

    /// Mostrar un toast; devuelve su seq para el auto-dismiss.
    pub fn show(&self, message: String, kind: ToastKind) -> u64 {
        let mut seq = self.next_seq.borrow_mut();
        *seq += 1;
        *self.current.borrow_mut() = Some(Toast {
            message,
            kind,
            seq: *seq,
        });
        *seq
    }

    /// Cerrar solo si sigue visible el toast con esa seq.
    pub fn dismiss(&self, seq: u64) {
        let mut current = self.current.borrow_mut();
        if current.as_ref().map(|t| t.seq) == Some(seq) {
            *current = None;
        }
    }

    pub fn clear(&self) {
        *self.current.borrow_mut() = None;
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_and_dismiss() {
        let toasts = ToastState::new();
        let seq = toasts.show("Saved".into(), ToastKind::Success);
        assert_eq!(toasts.current().unwrap().message, "Saved");

        toasts.dismiss(seq);
        assert!(toasts.current().is_none());
    }

    #[test]
    fn stale_dismiss_does_not_close_newer_toast() {
        let toasts = ToastState::new();
        let old = toasts.show("First".into(), ToastKind::Success);
        let _new = toasts.show("Second".into(), ToastKind::Error);

        // El timeout del primero llega tarde
        toasts.dismiss(old);
        assert_eq!(toasts.current().unwrap().message, "Second");
    }
}
