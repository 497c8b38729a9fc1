// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{AttendanceData, AttendanceFilter};
use crate::diesel_schema::attendance;
use crate::error::PersistenceError;

/// Diesel Queryable struct for attendance rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = attendance)]
struct AttendanceRow {
    log_id: i64,
    name: String,
    reg_no: String,
    timestamp: String,
    status: String,
    department: Option<String>,
    batch_year: Option<String>,
}

impl From<AttendanceRow> for AttendanceData {
    fn from(row: AttendanceRow) -> Self {
        Self {
            log_id: row.log_id,
            name: row.name,
            reg_no: row.reg_no,
            timestamp: row.timestamp,
            status: row.status,
            department: row.department,
            batch_year: row.batch_year,
        }
    }
}

fn filtered(filter: &AttendanceFilter) -> attendance::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let mut query = attendance::table.into_boxed();

    if let Some(date) = &filter.date {
        query = query.filter(attendance::timestamp.like(format!("{date}%")));
    }
    if let Some(department) = &filter.department {
        query = query.filter(attendance::department.eq(department.clone()));
    }
    if let Some(batch_year) = &filter.batch_year {
        query = query.filter(attendance::batch_year.eq(batch_year.clone()));
    }
    if let Some(reg_no) = &filter.reg_no {
        query = query.filter(attendance::reg_no.eq(reg_no.clone()));
    }

    query
}

/// Lists attendance rows matching a filter, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_attendance(
    conn: &mut SqliteConnection,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceData>, PersistenceError> {
    let mut query = filtered(filter).order(attendance::timestamp.desc());

    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }
    if let Some(offset) = filter.offset {
        query = query.offset(offset);
    }

    let rows: Vec<AttendanceRow> = query.select(AttendanceRow::as_select()).load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Counts attendance rows matching a filter, ignoring pagination.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_attendance(
    conn: &mut SqliteConnection,
    filter: &AttendanceFilter,
) -> Result<i64, PersistenceError> {
    Ok(filtered(filter).count().get_result(conn)?)
}

/// Returns the most recent attendance rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn recent_attendance(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AttendanceData>, PersistenceError> {
    let rows: Vec<AttendanceRow> = attendance::table
        .order(attendance::log_id.desc())
        .limit(limit)
        .select(AttendanceRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
