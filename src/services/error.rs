use thiserror::Error;

/// Taxonomía de errores del cliente. Todos terminan normalizados a un
/// string legible (vía `Display`) que la capa de toasts muestra tal cual.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Fallo de transporte: no hubo respuesta HTTP.
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 2xx con `success: false`, o status no-2xx con cuerpo.
    /// El mensaje ya viene formateado (errores por campo concatenados).
    #[error("{0}")]
    Api(String),

    /// Validación del lado cliente, antes de enviar nada.
    #[error("{0}")]
    Validation(String),

    /// 401 en una llamada autenticada: la sesión debe terminarse.
    #[error("Session expired, please log in again")]
    Unauthorized,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_toast_message() {
        assert_eq!(
            ApiError::Network("timed out".into()).to_string(),
            "Network error: timed out"
        );
        assert_eq!(
            ApiError::Api("email: Email is required".into()).to_string(),
            "email: Email is required"
        );
        assert_eq!(
            ApiError::Validation("Code has expired".into()).to_string(),
            "Code has expired"
        );
    }
}
