// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{departments, users};
use crate::error::PersistenceError;
use crate::queries::departments::count_students_in_department;

/// Creates a department.
///
/// # Returns
///
/// The ID assigned to the new department.
///
/// # Errors
///
/// Returns an error if the insert fails, including a
/// `UniqueConstraintViolation` when the name is already taken.
pub fn create_department(
    conn: &mut SqliteConnection,
    name: &str,
    hod_name: &str,
    description: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!("Creating department: {}", name);

    diesel::insert_into(departments::table)
        .values((
            departments::name.eq(name),
            departments::hod_name.eq(hod_name),
            departments::description.eq(description),
        ))
        .execute(conn)?;

    let department_id: i64 = get_last_insert_rowid(conn)?;

    Ok(department_id)
}

/// Updates a department's head and description.
///
/// # Errors
///
/// Returns an error if the update fails or no department has the given name.
pub fn update_department(
    conn: &mut SqliteConnection,
    name: &str,
    hod_name: &str,
    description: Option<&str>,
) -> Result<(), PersistenceError> {
    info!("Updating department: {}", name);

    let affected: usize = diesel::update(departments::table)
        .filter(departments::name.eq(name))
        .set((
            departments::hod_name.eq(hod_name),
            departments::description.eq(description),
            departments::updated_at
                .eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("Department '{name}'")));
    }

    Ok(())
}

/// Deletes a department and clears the department reference on any
/// remaining non-student users.
///
/// Refused while students are still assigned to the department.
///
/// # Errors
///
/// Returns `DepartmentHasStudents` if students are still assigned, or an
/// error if the delete fails or no department has the given name.
pub fn delete_department(conn: &mut SqliteConnection, name: &str) -> Result<(), PersistenceError> {
    info!("Deleting department: {}", name);

    conn.transaction(|conn| {
        let student_count: i64 = count_students_in_department(conn, name)?;
        if student_count > 0 {
            return Err(PersistenceError::DepartmentHasStudents {
                name: name.to_string(),
                student_count,
            });
        }

        let affected: usize = diesel::delete(departments::table)
            .filter(departments::name.eq(name))
            .execute(conn)
            .map_err(PersistenceError::from)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!("Department '{name}'")));
        }

        diesel::update(users::table)
            .filter(users::department.eq(name))
            .set(users::department.eq(None::<String>))
            .execute(conn)
            .map_err(PersistenceError::from)?;

        Ok(())
    })
}
