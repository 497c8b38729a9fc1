// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{DepartmentData, DepartmentStats};
use crate::diesel_schema::{attendance, departments, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
struct DepartmentRow {
    department_id: i64,
    name: String,
    hod_name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<DepartmentRow> for DepartmentData {
    fn from(row: DepartmentRow) -> Self {
        Self {
            department_id: row.department_id,
            name: row.name,
            hod_name: row.hod_name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a department by name.
///
/// Returns `Ok(None)` if the department is not found.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_department_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<DepartmentData>, PersistenceError> {
    debug!("Looking up department by name: {}", name);

    let result: Result<DepartmentRow, diesel::result::Error> = departments::table
        .filter(departments::name.eq(name))
        .select(DepartmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all departments ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(
    conn: &mut SqliteConnection,
) -> Result<Vec<DepartmentData>, PersistenceError> {
    let rows: Vec<DepartmentRow> = departments::table
        .order(departments::name.asc())
        .select(DepartmentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Counts students currently assigned to a department.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_students_in_department(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<i64, PersistenceError> {
    Ok(users::table
        .filter(users::department.eq(name))
        .filter(users::role.eq("student"))
        .count()
        .get_result(conn)?)
}

/// Computes headcounts and today's presence for a department.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The department name
/// * `today` - Today's calendar day (`YYYY-MM-DD`), used to bucket attendance
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn department_stats(
    conn: &mut SqliteConnection,
    name: &str,
    today: &str,
) -> Result<DepartmentStats, PersistenceError> {
    let student_count: i64 = count_students_in_department(conn, name)?;

    let staff_count: i64 = users::table
        .filter(users::department.eq(name))
        .filter(users::role.ne("student"))
        .count()
        .get_result(conn)?;

    let present_today: i64 = attendance::table
        .filter(attendance::department.eq(name))
        .filter(attendance::timestamp.like(format!("{today}%")))
        .count()
        .get_result(conn)?;

    Ok(DepartmentStats {
        name: name.to_string(),
        student_count,
        staff_count,
        present_today,
    })
}
