// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod profile_state;
pub mod request_guard;
pub mod reset_state;
pub mod session_state;
pub mod timelog_state;
pub mod toast_state;
pub mod users_state;

pub use app_state::{AppState, Route};
pub use profile_state::ProfileState;
pub use request_guard::RequestGuard;
pub use reset_state::{ResetFlow, ResetStep};
pub use session_state::{SessionPhase, SessionState};
pub use timelog_state::TimelogState;
pub use toast_state::{Toast, ToastKind, ToastState};
pub use users_state::UsersState;
