use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot normalizado del perfil del usuario.
/// Es la única forma que viaja entre servicios, caché y vistas.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProfileSnapshot {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// El backend devuelve el usuario con dos formas distintas según el endpoint:
/// `{data: {user: {...}}}` o `{data: {...}}` directamente. Esta función es el
/// único punto donde se resuelve esa ambigüedad.
pub fn normalize_user_payload(data: &Value) -> Result<ProfileSnapshot, String> {
    // Variante 1: data.user
    if let Some(user) = data.get("user") {
        if user.is_object() {
            return parse_snapshot(user);
        }
    }
    // Variante 2: data es el usuario directamente
    if data.is_object() {
        return parse_snapshot(data);
    }
    Err("Unrecognized profile payload shape".to_string())
}

fn parse_snapshot(value: &Value) -> Result<ProfileSnapshot, String> {
    // name + email son obligatorios; el resto opcional
    let name = value
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or("Profile payload missing 'name'")?;
    let email = value
        .get("email")
        .and_then(|v| v.as_str())
        .ok_or("Profile payload missing 'email'")?;

    Ok(ProfileSnapshot {
        name: name.to_string(),
        email: email.to_string(),
        phone_number: value
            .get("phone_number")
            .and_then(|v| v.as_str())
            .map(String::from),
        profile_picture: value
            .get("profile_picture")
            .and_then(|v| v.as_str())
            .map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_nested_user_variant() {
        let data = json!({"user": {"name": "Ana", "email": "ana@x.io", "phone_number": "555"}});
        let snap = normalize_user_payload(&data).unwrap();
        assert_eq!(snap.name, "Ana");
        assert_eq!(snap.email, "ana@x.io");
        assert_eq!(snap.phone_number.as_deref(), Some("555"));
        assert_eq!(snap.profile_picture, None);
    }

    #[test]
    fn normalizes_flat_variant() {
        let data = json!({"name": "Bo", "email": "bo@x.io", "profile_picture": "p.png"});
        let snap = normalize_user_payload(&data).unwrap();
        assert_eq!(snap.name, "Bo");
        assert_eq!(snap.profile_picture.as_deref(), Some("p.png"));
    }

    #[test]
    fn rejects_unknown_shape() {
        assert!(normalize_user_payload(&json!(42)).is_err());
        assert!(normalize_user_payload(&json!({"user": {"name": "X"}})).is_err());
    }
}
