use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registro de asistencia ("timelog") contra una instalación.
/// La lista vive solo en memoria: tras cada mutación se refetchea
/// la verdad del servidor, nunca se parchea localmente.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AttendanceRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub facility_id: Option<i64>,
}

impl AttendanceRecord {
    /// Horas trabajadas derivadas de los timestamps. `None` => "N/A".
    pub fn hours_worked(&self) -> Option<i64> {
        hours_worked(self.start_time.as_deref(), self.end_time.as_deref())
    }

    /// Un registro cuenta como "ya agregado" solo cuando título y ambos
    /// timestamps vienen no-nulos del servidor.
    pub fn is_already_added(&self) -> bool {
        self.title.is_some() && self.start_time.is_some() && self.end_time.is_some()
    }
}

/// Horas enteras entre dos timestamps del backend.
/// `None` cuando falta alguno, no parsea, o el intervalo es negativo.
pub fn hours_worked(start: Option<&str>, end: Option<&str>) -> Option<i64> {
    let start = parse_timestamp(start?)?;
    let end = parse_timestamp(end?)?;
    let hours = end.signed_duration_since(start).num_hours();
    if hours < 0 {
        return None;
    }
    Some(hours)
}

/// El backend mezcla RFC3339 y `YYYY-MM-DD HH:MM:SS`; aceptamos ambos.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Tratamiento visual de la columna de horas: <4h, 4-8h, >=8h.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoursBadge {
    Short,
    Regular,
    Long,
}

impl HoursBadge {
    pub fn from_hours(hours: i64) -> Self {
        if hours < 4 {
            HoursBadge::Short
        } else if hours < 8 {
            HoursBadge::Regular
        } else {
            HoursBadge::Long
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            HoursBadge::Short => "hours-short",
            HoursBadge::Regular => "hours-regular",
            HoursBadge::Long => "hours-long",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_worked_happy_path() {
        assert_eq!(
            hours_worked(
                Some("2026-03-01 08:00:00"),
                Some("2026-03-01 17:30:00")
            ),
            Some(9)
        );
        assert_eq!(
            hours_worked(
                Some("2026-03-01T08:00:00Z"),
                Some("2026-03-01T11:00:00Z")
            ),
            Some(3)
        );
    }

    #[test]
    fn hours_worked_is_none_on_missing_or_garbage() {
        assert_eq!(hours_worked(None, Some("2026-03-01 17:00:00")), None);
        assert_eq!(hours_worked(Some("2026-03-01 08:00:00"), None), None);
        assert_eq!(hours_worked(Some("not a date"), Some("2026-03-01 17:00:00")), None);
        // Intervalo negativo tampoco se muestra
        assert_eq!(
            hours_worked(Some("2026-03-01 17:00:00"), Some("2026-03-01 08:00:00")),
            None
        );
    }

    #[test]
    fn badge_thresholds() {
        assert_eq!(HoursBadge::from_hours(0), HoursBadge::Short);
        assert_eq!(HoursBadge::from_hours(3), HoursBadge::Short);
        assert_eq!(HoursBadge::from_hours(4), HoursBadge::Regular);
        assert_eq!(HoursBadge::from_hours(7), HoursBadge::Regular);
        assert_eq!(HoursBadge::from_hours(8), HoursBadge::Long);
        assert_eq!(HoursBadge::from_hours(12), HoursBadge::Long);
    }

    #[test]
    fn already_added_truth_table() {
        let base = AttendanceRecord {
            id: 1,
            title: Some("Visita".into()),
            description: None,
            start_time: Some("2026-03-01 08:00:00".into()),
            end_time: Some("2026-03-01 16:00:00".into()),
            user_id: 7,
            facility_id: Some(2),
        };
        assert!(base.is_already_added());

        let mut missing_title = base.clone();
        missing_title.title = None;
        assert!(!missing_title.is_already_added());

        let mut missing_start = base.clone();
        missing_start.start_time = None;
        assert!(!missing_start.is_already_added());

        let mut missing_end = base;
        missing_end.end_time = None;
        assert!(!missing_end.is_already_added());
    }
}
