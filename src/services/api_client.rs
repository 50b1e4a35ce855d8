// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: arma requests, adjunta el bearer token y
// mapea respuestas a la taxonomía de errores. Un 401 en una llamada
// autenticada se traduce a ApiError::Unauthorized para que la capa de
// arriba termine la sesión.
// ============================================================================

use crate::config::BACKEND_URL;
use crate::models::{
    normalize_user_payload, AttendanceRecord, LoginData, LoginResponse, ProfileSnapshot,
    ResetEnvelope, UserPage, UsersQuery,
};
use crate::services::error::ApiError;
use crate::utils::url::form_encode;
use gloo_net::http::{Request, Response};
use web_sys::FormData;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            token,
        }
    }

    fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Chequeo común de status. 401 termina la sesión; cualquier otro
    /// no-2xx se vuelve un ApiError::Api con el cuerpo como mensaje.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        if response.status() == 401 {
            log::warn!("🔒 401 recibido, la sesión debe terminarse");
            return Err(ApiError::Unauthorized);
        }
        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api(format!("HTTP {}: {}", status, body)));
        }
        Ok(response)
    }

    /// Login con credenciales form-encoded.
    /// Devuelve el mensaje del servidor tal cual cuando falla.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let body = form_encode(&[("email", email), ("password", password)]);

        log::info!("🔐 Iniciando sesión para: {}", email);

        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // El backend responde 200 con success:false para credenciales malas,
        // así que no pasamos por check() aquí.
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        if !login.success {
            let msg = login
                .message
                .unwrap_or_else(|| "Invalid credentials".to_string());
            log::error!("❌ Login fallido: {}", msg);
            return Err(ApiError::Api(msg));
        }

        login
            .data
            .ok_or_else(|| ApiError::Api("Login response missing data".to_string()))
    }

    /// Invalidación remota best-effort: la respuesta se ignora.
    pub async fn logout(&self) {
        let url = format!("{}/api/auth/logout", self.base_url);
        let mut builder = Request::post(&url);
        if let Some(auth) = self.bearer() {
            builder = builder.header("Authorization", &auth);
        }
        match builder.send().await {
            Ok(_) => log::info!("👋 Logout remoto notificado"),
            Err(e) => log::warn!("⚠️ Logout remoto falló (ignorado): {}", e),
        }
    }

    /// Paso 1 del reset: pedir el código por email.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_reset_step("request-reset", &[("email", email)])
            .await
    }

    /// Paso 2 del reset: validar el código recibido.
    pub async fn validate_reset_code(&self, email: &str, code: &str) -> Result<(), ApiError> {
        self.post_reset_step("validate-code", &[("email", email), ("code", code)])
            .await
    }

    /// Paso 3 del reset: nueva contraseña.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<(), ApiError> {
        self.post_reset_step(
            "reset",
            &[
                ("email", email),
                ("code", code),
                ("password", password),
                ("password_confirmation", password_confirmation),
            ],
        )
        .await
    }

    async fn post_reset_step(&self, step: &str, fields: &[(&str, &str)]) -> Result<(), ApiError> {
        let url = format!("{}/api/auth/password/{}", self.base_url, step);

        log::info!("🔑 Password reset: paso {}", step);

        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form_encode(fields))
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope: ResetEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        if envelope.success {
            Ok(())
        } else {
            // Concatenación de errores por campo, o message plano
            Err(ApiError::Api(envelope.error_message()))
        }
    }

    /// Fetch del perfil autenticado, ya normalizado.
    pub async fn get_user(&self) -> Result<ProfileSnapshot, ApiError> {
        let url = format!("{}/api/user/get-user", self.base_url);

        let response = self.authed_get(&url).await?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        let data = body
            .get("data")
            .ok_or_else(|| ApiError::Api("Profile response missing data".to_string()))?;
        normalize_user_payload(data).map_err(ApiError::Api)
    }

    /// Update del perfil (multipart: name, email, phone_number, foto opcional).
    /// Devuelve el snapshot normalizado que el caller debe escribir al caché.
    pub async fn update_profile(&self, form: FormData) -> Result<ProfileSnapshot, ApiError> {
        let url = format!("{}/api/user/update-profile", self.base_url);

        log::info!("📝 Actualizando perfil...");

        let mut builder = Request::post(&url);
        if let Some(auth) = self.bearer() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .body(form)
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.check(response).await?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        if !body.get("success").and_then(|v| v.as_bool()).unwrap_or(false) {
            let msg = body
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Profile update failed")
                .to_string();
            return Err(ApiError::Api(msg));
        }

        let data = body
            .get("data")
            .ok_or_else(|| ApiError::Api("Update response missing data".to_string()))?;
        normalize_user_payload(data).map_err(ApiError::Api)
    }

    /// Lista autoritativa de registros de asistencia.
    pub async fn get_tasks(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        let url = format!("{}/api/task/get", self.base_url);

        let response = self.authed_get(&url).await?;
        let tasks: TasksResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        log::info!("📋 Timelogs recibidos: {}", tasks.data.len());
        Ok(tasks.data)
    }

    /// Actualizar un registro existente.
    pub async fn update_task(&self, record: &AttendanceRecord) -> Result<(), ApiError> {
        let url = format!("{}/api/task/update", self.base_url);

        let mut builder = Request::patch(&url);
        if let Some(auth) = self.bearer() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .json(record)
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.check(response).await?;

        log::info!("✅ Timelog {} actualizado", record.id);
        Ok(())
    }

    /// Borrar un registro por id.
    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/api/task/delete/{}", self.base_url, id);

        let mut builder = Request::delete(&url);
        if let Some(auth) = self.bearer() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.check(response).await?;

        log::info!("🗑️ Timelog {} borrado", id);
        Ok(())
    }

    /// Export CSV de los timelogs (bytes crudos para descarga).
    pub async fn get_tasks_csv(&self) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/api/task/get-csv", self.base_url);

        let response = self.authed_get(&url).await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Api(format!("CSV download error: {}", e)))
    }

    /// Directorio paginado de usuarios.
    pub async fn get_users(&self, query: &UsersQuery) -> Result<UserPage, ApiError> {
        let url = format!(
            "{}/api/user/get-users-raw?{}",
            self.base_url,
            query.to_query_string()
        );

        let response = self.authed_get(&url).await?;
        let users: UsersResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Api(format!("Parse error: {}", e)))?;

        Ok(users.data)
    }

    async fn authed_get(&self, url: &str) -> Result<Response, ApiError> {
        let mut builder = Request::get(url);
        if let Some(auth) = self.bearer() {
            builder = builder.header("Authorization", &auth);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.check(response).await
    }
}

#[derive(serde::Deserialize)]
struct TasksResponse {
    #[allow(dead_code)]
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<AttendanceRecord>,
}

#[derive(serde::Deserialize)]
struct UsersResponse {
    #[allow(dead_code)]
    #[serde(default)]
    success: bool,
    data: UserPage,
}
