// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance log mutations.
//!
//! The log is append-only: rows are inserted at verification time and can
//! only ever be deleted, never updated.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;

/// Appends an attendance row.
///
/// The user's name, registration number, department, and batch year are
/// copied into the row so the log is self-contained.
///
/// # Returns
///
/// The log ID assigned to the new row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn log_attendance(
    conn: &mut SqliteConnection,
    name: &str,
    reg_no: &str,
    timestamp: &str,
    status: &str,
    department: Option<&str>,
    batch_year: Option<&str>,
) -> Result<i64, PersistenceError> {
    info!("Logging attendance for reg_no: {} at {}", reg_no, timestamp);

    diesel::insert_into(attendance::table)
        .values((
            attendance::name.eq(name),
            attendance::reg_no.eq(reg_no),
            attendance::timestamp.eq(timestamp),
            attendance::status.eq(status),
            attendance::department.eq(department),
            attendance::batch_year.eq(batch_year),
        ))
        .execute(conn)?;

    let log_id: i64 = get_last_insert_rowid(conn)?;

    Ok(log_id)
}

/// Deletes an attendance row.
///
/// # Errors
///
/// Returns an error if the delete fails or no row has the given ID.
pub fn delete_attendance(conn: &mut SqliteConnection, log_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting attendance log ID: {}", log_id);

    let affected: usize = diesel::delete(attendance::table)
        .filter(attendance::log_id.eq(log_id))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Attendance log {log_id}"
        )));
    }

    Ok(())
}
