// ============================================================================
// VIEWS MODULE - Vistas en Rust puro (sin frameworks)
// ============================================================================
// Cada vista es una función render_* que devuelve un Element armado con
// ElementBuilder. Las vistas leen el estado y delegan toda mutación a
// los viewmodels; el re-render completo lo dispara notify_change().
// ============================================================================

pub mod app;
pub mod header;
pub mod login;
pub mod profile;
pub mod reset_modal;
pub mod timelogs;
pub mod toast;
pub mod users;

pub use app::render_app;
