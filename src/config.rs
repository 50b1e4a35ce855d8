/// URL base del backend REST.
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:8000 (por defecto)
/// - Producción: via BACKEND_URL en .env (ver build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// Duración del countdown del código de reset (segundos).
pub const RESET_CODE_TTL_SECS: u32 = 120;

/// Auto-dismiss de los toasts (milisegundos).
pub const TOAST_DISMISS_MS: u32 = 3_000;

/// Longitud mínima de contraseña en el paso final del reset.
pub const MIN_PASSWORD_LEN: usize = 8;
