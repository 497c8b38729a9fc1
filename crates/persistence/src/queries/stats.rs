// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Campus-wide dashboard counters.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{
    AttendanceStats, DailyAttendance, DashboardStats, MonthlyAttendance, RoleAttendance,
    StudentAttendanceTotals, TopPerformer,
};
use crate::diesel_schema::{attendance, departments, users};
use crate::error::PersistenceError;

/// Computes the dashboard counters.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `today` - Today's calendar day (`YYYY-MM-DD`), used to bucket attendance
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn dashboard_stats(
    conn: &mut SqliteConnection,
    today: &str,
) -> Result<DashboardStats, PersistenceError> {
    let total_students: i64 = users::table
        .filter(users::role.eq("student"))
        .count()
        .get_result(conn)?;

    let total_staff: i64 = users::table
        .filter(users::role.ne("student"))
        .count()
        .get_result(conn)?;

    let total_departments: i64 = departments::table.count().get_result(conn)?;

    let present_today: i64 = attendance::table
        .filter(attendance::timestamp.like(format!("{today}%")))
        .count()
        .get_result(conn)?;

    Ok(DashboardStats {
        total_students,
        total_staff,
        total_departments,
        present_today,
    })
}

#[derive(QueryableByName)]
struct DailyRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    date: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct MonthlyRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    month: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    unique_students: i64,
}

#[derive(QueryableByName)]
struct RoleRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    role: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct PerformerRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    reg_no: String,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

#[derive(QueryableByName)]
struct TodayRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    unique_students: i64,
}

#[derive(QueryableByName)]
struct TotalsRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    total: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    today: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    this_week: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    this_month: i64,
}

/// Computes aggregated attendance analytics: today's totals, the trailing
/// week's per-day volumes, today's role-wise counts, and the top ten
/// students by all-time volume.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `today` - Today's calendar day (`YYYY-MM-DD`)
/// * `week_ago` - The calendar day seven days back (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn attendance_stats(
    conn: &mut SqliteConnection,
    today: &str,
    week_ago: &str,
) -> Result<AttendanceStats, PersistenceError> {
    let today_totals: TodayRow = diesel::sql_query(
        "SELECT COUNT(*) AS count, COUNT(DISTINCT reg_no) AS unique_students \
         FROM attendance WHERE substr(timestamp, 1, 10) = ?",
    )
    .bind::<diesel::sql_types::Text, _>(today)
    .get_result(conn)?;

    let daily_rows: Vec<DailyRow> = diesel::sql_query(
        "SELECT substr(timestamp, 1, 10) AS date, COUNT(*) AS count \
         FROM attendance WHERE substr(timestamp, 1, 10) >= ? \
         GROUP BY date ORDER BY date",
    )
    .bind::<diesel::sql_types::Text, _>(week_ago)
    .load(conn)?;

    let role_rows: Vec<RoleRow> = diesel::sql_query(
        "SELECT u.role AS role, COUNT(a.log_id) AS count \
         FROM users u \
         LEFT JOIN attendance a \
           ON u.reg_no = a.reg_no AND substr(a.timestamp, 1, 10) = ? \
         GROUP BY u.role ORDER BY u.role",
    )
    .bind::<diesel::sql_types::Text, _>(today)
    .load(conn)?;

    let performer_rows: Vec<PerformerRow> = diesel::sql_query(
        "SELECT u.name AS name, u.reg_no AS reg_no, COUNT(a.log_id) AS count \
         FROM users u \
         LEFT JOIN attendance a ON u.reg_no = a.reg_no \
         WHERE u.role = 'student' \
         GROUP BY u.reg_no, u.name \
         ORDER BY count DESC LIMIT 10",
    )
    .load(conn)?;

    Ok(AttendanceStats {
        today_count: today_totals.count,
        unique_students: today_totals.unique_students,
        daily: daily_rows
            .into_iter()
            .map(|row| DailyAttendance {
                date: row.date,
                count: row.count,
            })
            .collect(),
        by_role: role_rows
            .into_iter()
            .map(|row| RoleAttendance {
                role: row.role,
                count: row.count,
            })
            .collect(),
        top_performers: performer_rows
            .into_iter()
            .map(|row| TopPerformer {
                name: row.name,
                reg_no: row.reg_no,
                count: row.count,
            })
            .collect(),
    })
}

/// Computes per-month attendance volumes from a cutoff day onward.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `since` - The earliest calendar day to include (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn monthly_trends(
    conn: &mut SqliteConnection,
    since: &str,
) -> Result<Vec<MonthlyAttendance>, PersistenceError> {
    let rows: Vec<MonthlyRow> = diesel::sql_query(
        "SELECT substr(timestamp, 1, 7) AS month, COUNT(*) AS count, \
                COUNT(DISTINCT reg_no) AS unique_students \
         FROM attendance WHERE substr(timestamp, 1, 10) >= ? \
         GROUP BY month ORDER BY month",
    )
    .bind::<diesel::sql_types::Text, _>(since)
    .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| MonthlyAttendance {
            month: row.month,
            count: row.count,
            unique_students: row.unique_students,
        })
        .collect())
}

/// Computes a student's attendance totals over the standard windows.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reg_no` - The student's registration number
/// * `today` - Today's calendar day (`YYYY-MM-DD`)
/// * `week_ago` - The calendar day seven days back
/// * `month_ago` - The calendar day thirty days back
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn student_attendance_totals(
    conn: &mut SqliteConnection,
    reg_no: &str,
    today: &str,
    week_ago: &str,
    month_ago: &str,
) -> Result<StudentAttendanceTotals, PersistenceError> {
    let row: TotalsRow = diesel::sql_query(
        "SELECT COUNT(*) AS total, \
                COUNT(CASE WHEN substr(timestamp, 1, 10) = ? THEN 1 END) AS today, \
                COUNT(CASE WHEN substr(timestamp, 1, 10) >= ? THEN 1 END) AS this_week, \
                COUNT(CASE WHEN substr(timestamp, 1, 10) >= ? THEN 1 END) AS this_month \
         FROM attendance WHERE reg_no = ?",
    )
    .bind::<diesel::sql_types::Text, _>(today)
    .bind::<diesel::sql_types::Text, _>(week_ago)
    .bind::<diesel::sql_types::Text, _>(month_ago)
    .bind::<diesel::sql_types::Text, _>(reg_no)
    .get_result(conn)?;

    Ok(StudentAttendanceTotals {
        total: row.total,
        today: row.today,
        this_week: row.this_week,
        this_month: row.this_month,
    })
}
