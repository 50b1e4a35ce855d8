use serde::{Deserialize, Serialize};

/// Fila del directorio de usuarios (`get-users-raw`).
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub facility_id: Option<i64>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub total: i64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl UserPage {
    /// Páginas totales para el pager. Nunca menos de 1, y un
    /// `per_page` de 0 explícito del servidor no divide por cero.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 1;
        }
        let per_page = self.per_page.max(1);
        ((self.total as u32) + per_page - 1) / per_page
    }
}

/// Parámetros de consulta del directorio paginado.
#[derive(Clone, PartialEq, Debug)]
pub struct UsersQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub facility_id: Option<i64>,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            search: String::new(),
            facility_id: None,
        }
    }
}

impl UsersQuery {
    /// Query string listo para pegar a la URL.
    pub fn to_query_string(&self) -> String {
        let mut qs = format!("page={}&per_page={}", self.page, self.per_page);
        if !self.search.is_empty() {
            qs.push_str("&search=");
            qs.push_str(&crate::utils::url_encode(&self.search));
        }
        if let Some(fid) = self.facility_id {
            qs.push_str(&format!("&facility_id={}", fid));
        }
        qs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_skips_empty_filters() {
        let q = UsersQuery::default();
        assert_eq!(q.to_query_string(), "page=1&per_page=20");
    }

    #[test]
    fn total_pages_rounds_up_and_survives_zero_per_page() {
        let page = |total: i64, per_page: u32| UserPage {
            users: vec![],
            total,
            page: 1,
            per_page,
        };
        assert_eq!(page(0, 20).total_pages(), 1);
        assert_eq!(page(20, 20).total_pages(), 1);
        assert_eq!(page(21, 20).total_pages(), 2);
        // per_page: 0 explícito en el JSON no debe dividir por cero
        assert_eq!(page(5, 0).total_pages(), 5);
    }

    #[test]
    fn query_string_includes_search_and_facility() {
        let q = UsersQuery {
            page: 3,
            per_page: 10,
            search: "ana maría".into(),
            facility_id: Some(4),
        };
        assert_eq!(
            q.to_query_string(),
            "page=3&per_page=10&search=ana%20mar%C3%ADa&facility_id=4"
        );
    }
}
