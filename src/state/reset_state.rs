// ============================================================================
// RESET FLOW - FSM del reset de contraseña en tres pasos
// ============================================================================
// EMAIL_ENTRY → CODE_ENTRY → NEW_PASSWORD_ENTRY → DONE, con sub-estado
// EXPIRED en CODE_ENTRY cuando el countdown de 120s llega a cero.
// El núcleo es puro y avanza con tick(); el Interval real vive en el
// viewmodel (wasm).
// ============================================================================

use crate::config::{MIN_PASSWORD_LEN, RESET_CODE_TTL_SECS};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResetStep {
    EmailEntry,
    CodeEntry,
    NewPasswordEntry,
    Done,
}

#[derive(Clone, Debug)]
pub struct ResetFlow {
    step: ResetStep,
    remaining_secs: u32,
    expired: bool,
    pub email: String,
    pub code: String,
}

impl ResetFlow {
    pub fn new() -> Self {
        Self {
            step: ResetStep::EmailEntry,
            remaining_secs: 0,
            expired: false,
            email: String::new(),
            code: String::new(),
        }
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// El email fue aceptado: avanzar a CODE_ENTRY y arrancar el countdown.
    pub fn email_accepted(&mut self, email: String) {
        self.email = email;
        self.step = ResetStep::CodeEntry;
        self.remaining_secs = RESET_CODE_TTL_SECS;
        self.expired = false;
    }

    /// Un tick de un segundo. Devuelve true si este tick produjo la expiración.
    pub fn tick(&mut self) -> bool {
        if self.step != ResetStep::CodeEntry || self.expired {
            return false;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.expired = true;
            log::warn!("⏰ Código de reset expirado");
            return true;
        }
        false
    }

    /// ¿Se puede enviar el código? Rechazo local si expiró: cero red.
    pub fn check_code_submission(&self) -> Result<(), String> {
        if self.step != ResetStep::CodeEntry {
            return Err("Not expecting a code right now".to_string());
        }
        if self.expired {
            return Err("Code has expired".to_string());
        }
        Ok(())
    }

    /// El código fue validado por el servidor: detener countdown y avanzar.
    pub fn code_accepted(&mut self, code: String) {
        self.code = code;
        self.step = ResetStep::NewPasswordEntry;
        self.remaining_secs = 0;
        self.expired = false;
    }

    /// El usuario pidió un código nuevo: reinicia el countdown en CODE_ENTRY.
    pub fn new_code_requested(&mut self) {
        self.step = ResetStep::CodeEntry;
        self.remaining_secs = RESET_CODE_TTL_SECS;
        self.expired = false;
    }

    /// Validación client-side del último paso, previa a habilitar el submit.
    pub fn check_new_password(password: &str, confirmation: &str) -> Result<(), String> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if password != confirmation {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }

    /// Contraseña aceptada por el servidor: flujo terminado, cerrar modal.
    pub fn password_accepted(&mut self) {
        self.step = ResetStep::Done;
    }
}

impl Default for ResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_happy_path() {
        let mut flow = ResetFlow::new();
        assert_eq!(flow.step(), ResetStep::EmailEntry);

        flow.email_accepted("ana@x.io".into());
        assert_eq!(flow.step(), ResetStep::CodeEntry);
        assert_eq!(flow.remaining_secs(), 120);

        // Unos ticks después el código sigue siendo válido
        for _ in 0..30 {
            assert!(!flow.tick());
        }
        assert!(flow.check_code_submission().is_ok());

        flow.code_accepted("123456".into());
        assert_eq!(flow.step(), ResetStep::NewPasswordEntry);
        // El countdown quedó detenido
        assert!(!flow.tick());

        flow.password_accepted();
        assert_eq!(flow.step(), ResetStep::Done);
    }

    #[test]
    fn countdown_expires_after_120_ticks_and_blocks_submission() {
        let mut flow = ResetFlow::new();
        flow.email_accepted("ana@x.io".into());

        let mut expired_on = None;
        for i in 1..=120 {
            if flow.tick() {
                expired_on = Some(i);
            }
        }
        assert_eq!(expired_on, Some(120));
        assert!(flow.is_expired());

        // Rechazo local, sin llamada de red
        assert_eq!(
            flow.check_code_submission().unwrap_err(),
            "Code has expired"
        );
    }

    #[test]
    fn requesting_new_code_resets_the_countdown() {
        let mut flow = ResetFlow::new();
        flow.email_accepted("ana@x.io".into());
        for _ in 0..120 {
            flow.tick();
        }
        assert!(flow.is_expired());

        flow.new_code_requested();
        assert_eq!(flow.step(), ResetStep::CodeEntry);
        assert_eq!(flow.remaining_secs(), 120);
        assert!(flow.check_code_submission().is_ok());
    }

    #[test]
    fn ticks_after_expiry_change_nothing() {
        let mut flow = ResetFlow::new();
        flow.email_accepted("ana@x.io".into());
        for _ in 0..120 {
            flow.tick();
        }
        assert!(flow.is_expired());

        // El reporte de expiración se emite una sola vez; después de eso
        // cada tick es inerte (el ticker real ya fue cancelado)
        for _ in 0..10 {
            assert!(!flow.tick());
        }
        assert!(flow.is_expired());
        assert_eq!(flow.remaining_secs(), 0);
    }

    #[test]
    fn new_password_rules() {
        assert!(ResetFlow::check_new_password("short", "short").is_err());
        assert_eq!(
            ResetFlow::check_new_password("longenough", "different").unwrap_err(),
            "Passwords do not match"
        );
        assert!(ResetFlow::check_new_password("longenough", "longenough").is_ok());
    }

    #[test]
    fn tick_outside_code_entry_is_a_noop() {
        let mut flow = ResetFlow::new();
        assert!(!flow.tick());
        assert_eq!(flow.remaining_secs(), 0);
        assert!(!flow.is_expired());
    }
}
