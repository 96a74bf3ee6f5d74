//! User persistence and report queries for the academic records API.
//!
//! Implements the create-user insert and the three fixed read-only
//! reports over the `Usuarios`/`Asignaturas`/`Seccion` schema. All
//! functions take a plain `&Connection`; callers own connection
//! acquisition and release (one pooled connection per request).
//!
//! Reports never mutate anything and return an empty `Vec` when there
//! are no rows.

use aula_types::{NewUser, ObjectiveRow, Role, SectionReportRow, TeacherCountRow};
use rusqlite::{params, Connection};
use thiserror::Error;

/// Errors that can occur during record operations.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The insert hit a uniqueness constraint: the cedula or matricula
    /// already exists. Surfaced to API clients as a 400.
    #[error("la cédula o matrícula ya existe")]
    Duplicate,

    /// Any other SQLite failure. Surfaced to API clients as a 500
    /// carrying the underlying message.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Inserts a new user as a single auto-committed row.
///
/// The record is bound column-by-column in schema order. Role and sex
/// codes are normalized to uppercase and the birth date is stored as
/// an ISO-8601 string. Codes outside the known role set are accepted
/// as-is; uniqueness is left entirely to the store's constraints.
///
/// # Errors
///
/// Returns [`RecordsError::Duplicate`] on a constraint violation
/// (duplicate cedula or matricula) and [`RecordsError::Database`] for
/// any other SQLite error.
pub fn insert_user(conn: &Connection, user: &NewUser) -> Result<(), RecordsError> {
    conn.execute(
        "INSERT INTO Usuarios
            (Cedula, Nombre, Apellido, Rol, Matricula, FechaNacimiento, Sexo, Objetivo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user.cedula,
            user.nombre,
            user.apellido,
            user.rol.to_uppercase(),
            user.matricula,
            user.fecha_nacimiento.to_string(),
            user.sexo.to_uppercase(),
            user.objetivo,
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            RecordsError::Duplicate
        }
        other => RecordsError::Database(other),
    })?;
    Ok(())
}

/// Section roster report: every enrollment with the student's and
/// teacher's full names and the subject name, stable by section ID.
pub fn section_report(conn: &Connection) -> Result<Vec<SectionReportRow>, RecordsError> {
    let mut stmt = conn.prepare(
        "SELECT
            est.Nombre || ' ' || est.Apellido AS Estudiante,
            a.Nombre AS Asignatura,
            doc.Nombre || ' ' || doc.Apellido AS Docente
         FROM Seccion s
         JOIN Usuarios est ON s.CedulaEstudiante = est.Cedula
         JOIN Asignaturas a ON s.ClaveAsignatura = a.Clave
         JOIN Usuarios doc ON s.CedulaDocente = doc.Cedula
         ORDER BY s.ID",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(SectionReportRow {
            estudiante: row.get("Estudiante")?,
            asignatura: row.get("Asignatura")?,
            docente: row.get("Docente")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Student-count-per-teacher report.
///
/// Grouped by teacher cedula, not by display name, so two teachers who
/// happen to share a full name are never merged. Teachers with no
/// sections do not appear.
pub fn teacher_student_counts(conn: &Connection) -> Result<Vec<TeacherCountRow>, RecordsError> {
    let mut stmt = conn.prepare(
        "SELECT
            doc.Nombre || ' ' || doc.Apellido AS Docente,
            COUNT(s.CedulaEstudiante) AS Cantidad_Estudiantes
         FROM Seccion s
         JOIN Usuarios doc ON s.CedulaDocente = doc.Cedula
         GROUP BY doc.Cedula
         ORDER BY Docente",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(TeacherCountRow {
            docente: row.get("Docente")?,
            cantidad_estudiantes: row.get("Cantidad_Estudiantes")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Student-objectives report: every user with the student role code.
pub fn student_objectives(conn: &Connection) -> Result<Vec<ObjectiveRow>, RecordsError> {
    let mut stmt = conn.prepare(
        "SELECT
            Nombre || ' ' || Apellido AS Estudiante,
            Objetivo
         FROM Usuarios
         WHERE Rol = ?1
         ORDER BY Cedula",
    )?;
    let rows = stmt.query_map([Role::Student.as_code()], |row| {
        Ok(ObjectiveRow {
            estudiante: row.get("Estudiante")?,
            objetivo: row.get("Objetivo")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
