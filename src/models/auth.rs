use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rol del usuario autenticado. El backend lo envía como string libre;
/// cualquier valor desconocido se trata como `Customer`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Role {
    Admin,
    Team,
    Customer,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "admin" => Role::Admin,
            "team" => Role::Team,
            _ => Role::Customer,
        }
    }

    /// Destino de redirección tras un login exitoso.
    pub fn redirect_target(&self) -> &'static str {
        match self {
            Role::Admin => "dashboard",
            Role::Team => "client-dashboard",
            Role::Customer => "customer-dashboard",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Team => "team",
            Role::Customer => "customer",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserSummary {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginData {
    pub token: String,
    pub user: UserSummary,
}

/// Sobre genérico de los endpoints de password-reset:
/// `{success, message, data?: {error: {campo: [mensajes]}}}`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResetEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ResetErrorData>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResetErrorData {
    #[serde(default)]
    pub error: Option<BTreeMap<String, Vec<String>>>,
}

impl ResetEnvelope {
    /// Mensaje plano para mostrar en UI: concatena los errores por campo
    /// (orden determinista por nombre de campo) o usa `message` si no hay mapa.
    pub fn error_message(&self) -> String {
        if let Some(data) = &self.data {
            if let Some(map) = &data.error {
                let parts: Vec<String> = map
                    .iter()
                    .flat_map(|(field, msgs)| {
                        msgs.iter().map(move |m| format!("{}: {}", field, m))
                    })
                    .collect();
                if !parts.is_empty() {
                    return parts.join(", ");
                }
            }
        }
        self.message
            .clone()
            .unwrap_or_else(|| "Request failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_redirect_targets() {
        assert_eq!(Role::parse("admin").redirect_target(), "dashboard");
        assert_eq!(Role::parse("team").redirect_target(), "client-dashboard");
        assert_eq!(
            Role::parse("customer").redirect_target(),
            "customer-dashboard"
        );
        // Rol desconocido cae en customer
        assert_eq!(Role::parse("???").redirect_target(), "customer-dashboard");
    }

    #[test]
    fn envelope_concatenates_field_errors() {
        let json = r#"{
            "success": false,
            "message": "Validation failed",
            "data": {
                "error": {
                    "code": ["Code is invalid"],
                    "email": ["Email is required", "Email is malformed"]
                }
            }
        }"#;
        let env: ResetEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(
            env.error_message(),
            "code: Code is invalid, email: Email is required, email: Email is malformed"
        );
    }

    #[test]
    fn envelope_falls_back_to_message() {
        let json = r#"{"success": false, "message": "Code has expired"}"#;
        let env: ResetEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.error_message(), "Code has expired");
    }
}
