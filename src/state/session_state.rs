// ============================================================================
// SESSION STATE - Máquina de estados de autenticación
// ============================================================================
// ANONYMOUS → AUTHENTICATING → AUTHENTICATED, y de vuelta a ANONYMOUS
// en logout o terminación forzada (401). Solo el credential store / los
// viewmodels mutan esto; las vistas únicamente leen.
// ============================================================================

use crate::models::{Role, UserSummary};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Clone)]
pub struct SessionState {
    phase: Rc<RefCell<SessionPhase>>,
    token: Rc<RefCell<Option<String>>>,
    user: Rc<RefCell<Option<UserSummary>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(RefCell::new(SessionPhase::Anonymous)),
            token: Rc::new(RefCell::new(None)),
            user: Rc::new(RefCell::new(None)),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.user.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role())
    }

    /// Arranca un intento de login.
    pub fn begin_login(&self) {
        *self.phase.borrow_mut() = SessionPhase::Authenticating;
    }

    /// Login exitoso: guarda token + usuario y pasa a AUTHENTICATED.
    pub fn complete_login(&self, token: String, user: UserSummary) {
        *self.token.borrow_mut() = Some(token);
        *self.user.borrow_mut() = Some(user);
        *self.phase.borrow_mut() = SessionPhase::Authenticated;
        log::info!("✅ Sesión AUTHENTICATED");
    }

    /// Login fallido: vuelve a ANONYMOUS sin tocar nada más.
    pub fn fail_login(&self) {
        *self.phase.borrow_mut() = SessionPhase::Anonymous;
    }

    /// Logout o terminación forzada: limpia todo el estado en memoria.
    pub fn terminate(&self) {
        *self.token.borrow_mut() = None;
        *self.user.borrow_mut() = None;
        *self.phase.borrow_mut() = SessionPhase::Anonymous;
        log::info!("👋 Sesión terminada → ANONYMOUS");
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> UserSummary {
        UserSummary {
            id: 1,
            name: "Ana".into(),
            email: "ana@x.io".into(),
            role: role.into(),
        }
    }

    #[test]
    fn login_walks_the_state_machine() {
        let session = SessionState::new();
        assert_eq!(session.phase(), SessionPhase::Anonymous);

        session.begin_login();
        assert_eq!(session.phase(), SessionPhase::Authenticating);

        session.complete_login("tok".into(), user("admin"));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(session.token().as_deref(), Some("tok"));
    }

    #[test]
    fn failed_login_returns_to_anonymous() {
        let session = SessionState::new();
        session.begin_login();
        session.fail_login();
        assert_eq!(session.phase(), SessionPhase::Anonymous);
        assert!(session.token().is_none());
    }

    #[test]
    fn terminate_clears_everything() {
        let session = SessionState::new();
        session.begin_login();
        session.complete_login("tok".into(), user("team"));

        session.terminate();
        assert_eq!(session.phase(), SessionPhase::Anonymous);
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }
}
