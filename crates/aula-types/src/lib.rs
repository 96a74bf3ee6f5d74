//! Shared domain types for the academic records API.
//!
//! This crate provides the types used across the workspace: user role
//! codes, the incoming user record, and the typed rows produced by the
//! report queries.
//!
//! No crate in the workspace depends on anything *except* `aula-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User roles, stored in the database as single-letter codes.
///
/// The codes follow the original Spanish schema: `E` (estudiante) for
/// students and `D` (docente) for teachers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// A student (`E`).
    Student,
    /// A teacher (`D`).
    Teacher,
}

impl Role {
    /// Returns the single-letter code stored in the `Rol` column.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Student => "E",
            Self::Teacher => "D",
        }
    }

    /// Attempts to interpret a code as a known role, case-insensitively.
    ///
    /// Returns `None` for codes outside the known set. The create
    /// endpoint deliberately does not reject unknown codes; this is for
    /// the places that must interpret a code, such as the report queries
    /// and seed data.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "E" => Some(Self::Student),
            "D" => Some(Self::Teacher),
            _ => None,
        }
    }
}

fn default_objetivo() -> Option<String> {
    Some("No definido".to_string())
}

/// A candidate user record as received by `POST /usuarios/`.
///
/// `cedula` is the natural key; `matricula` is an optional secondary
/// unique key. Both uniqueness constraints are enforced by the store,
/// not pre-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// National ID, globally unique.
    pub cedula: String,
    /// First name.
    pub nombre: String,
    /// Last name.
    pub apellido: String,
    /// Role code; normalized to uppercase on insert.
    pub rol: String,
    /// Optional enrollment/staff code, globally unique when present.
    pub matricula: Option<String>,
    /// Birth date; serialized as an ISO-8601 string on the wire and in
    /// the store.
    pub fecha_nacimiento: NaiveDate,
    /// Sex code; normalized to uppercase on insert.
    pub sexo: String,
    /// Goal/objective text. Absent in the request body means the
    /// default; an explicit `null` stays null.
    #[serde(default = "default_objetivo")]
    pub objetivo: Option<String>,
}

/// One row of the section roster report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReportRow {
    /// Student's full name.
    #[serde(rename = "Estudiante")]
    pub estudiante: String,
    /// Subject display name.
    #[serde(rename = "Asignatura")]
    pub asignatura: String,
    /// Teacher's full name.
    #[serde(rename = "Docente")]
    pub docente: String,
}

/// One row of the student-count-per-teacher report.
///
/// Teachers with no sections do not appear (inner join semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherCountRow {
    /// Teacher's full name.
    #[serde(rename = "Docente")]
    pub docente: String,
    /// Number of students enrolled under this teacher.
    #[serde(rename = "Cantidad_Estudiantes")]
    pub cantidad_estudiantes: i64,
}

/// One row of the student-objectives report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveRow {
    /// Student's full name.
    #[serde(rename = "Estudiante")]
    pub estudiante: String,
    /// The student's stated objective, if any.
    #[serde(rename = "Objetivo")]
    pub objetivo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_round_trip() {
        for role in [Role::Student, Role::Teacher] {
            assert_eq!(Role::from_code(role.as_code()), Some(role));
        }
    }

    #[test]
    fn role_from_code_is_case_insensitive() {
        assert_eq!(Role::from_code("e"), Some(Role::Student));
        assert_eq!(Role::from_code("d"), Some(Role::Teacher));
    }

    #[test]
    fn role_from_code_rejects_unknown() {
        assert_eq!(Role::from_code("X"), None);
        assert_eq!(Role::from_code(""), None);
        assert_eq!(Role::from_code("ED"), None);
    }

    #[test]
    fn new_user_defaults_objetivo_when_absent() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "cedula": "111-1111111-1",
            "nombre": "Ana",
            "apellido": "Pérez",
            "rol": "E",
            "matricula": "2024-001",
            "fecha_nacimiento": "2005-07-01",
            "sexo": "F"
        }))
        .expect("record should deserialize");
        assert_eq!(user.objetivo.as_deref(), Some("No definido"));
    }

    #[test]
    fn new_user_keeps_explicit_null_objetivo() {
        let user: NewUser = serde_json::from_value(serde_json::json!({
            "cedula": "111-1111111-1",
            "nombre": "Ana",
            "apellido": "Pérez",
            "rol": "E",
            "matricula": null,
            "fecha_nacimiento": "2005-07-01",
            "sexo": "F",
            "objetivo": null
        }))
        .expect("record should deserialize");
        assert_eq!(user.objetivo, None);
        assert_eq!(user.matricula, None);
    }

    #[test]
    fn birth_date_serializes_iso8601() {
        let date = NaiveDate::from_ymd_opt(2006, 1, 15).unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), "2006-01-15");
    }

    #[test]
    fn report_rows_use_spanish_wire_keys() {
        let row = SectionReportRow {
            estudiante: "Juan Reyes".to_string(),
            asignatura: "Introducción a la Programación".to_string(),
            docente: "Maria Sosa".to_string(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Estudiante"], "Juan Reyes");
        assert_eq!(value["Asignatura"], "Introducción a la Programación");
        assert_eq!(value["Docente"], "Maria Sosa");

        let count = TeacherCountRow {
            docente: "Maria Sosa".to_string(),
            cantidad_estudiantes: 1,
        };
        let value = serde_json::to_value(&count).unwrap();
        assert_eq!(value["Docente"], "Maria Sosa");
        assert_eq!(value["Cantidad_Estudiantes"], 1);
    }
}
