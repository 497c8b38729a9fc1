// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub name: String,
    pub reg_no: String,
    pub role: String,
    pub department: Option<String>,
    pub batch_year: Option<String>,
    pub finger_id: Option<i64>,
    pub mac_address: Option<String>,
    pub password_hash: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The fields needed to register a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub reg_no: String,
    pub role: String,
    pub department: Option<String>,
    pub batch_year: Option<String>,
    pub finger_id: Option<i64>,
    pub mac_address: Option<String>,
    pub password_hash: Option<String>,
    pub photo_path: Option<String>,
}

/// A wholesale profile replacement for an existing user.
///
/// `None` fields clear the stored value, matching a full-form edit.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub role: String,
    pub department: Option<String>,
    pub batch_year: Option<String>,
    pub mac_address: Option<String>,
}

/// Serializable representation of an attendance log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceData {
    pub log_id: i64,
    pub name: String,
    pub reg_no: String,
    pub timestamp: String,
    pub status: String,
    pub department: Option<String>,
    pub batch_year: Option<String>,
}

/// Filters for browsing and exporting the attendance log.
///
/// All fields are optional; unset fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Restrict to rows from this calendar day (`YYYY-MM-DD`).
    pub date: Option<String>,
    pub department: Option<String>,
    pub batch_year: Option<String>,
    pub reg_no: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Serializable representation of a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentData {
    pub department_id: i64,
    pub name: String,
    pub hod_name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Per-department headcounts and today's presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub name: String,
    pub student_count: i64,
    pub staff_count: i64,
    pub present_today: i64,
}

/// One day's attendance volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAttendance {
    pub date: String,
    pub count: i64,
}

/// One month's attendance volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAttendance {
    pub month: String,
    pub count: i64,
    pub unique_students: i64,
}

/// Today's attendance volume for one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAttendance {
    pub role: String,
    pub count: i64,
}

/// A student ranked by all-time attendance volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPerformer {
    pub name: String,
    pub reg_no: String,
    pub count: i64,
}

/// Aggregated attendance analytics for the dashboard charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Rows logged today.
    pub today_count: i64,
    /// Distinct registration numbers logged today.
    pub unique_students: i64,
    /// Per-day volumes over the trailing week.
    pub daily: Vec<DailyAttendance>,
    /// Today's volumes bucketed by role.
    pub by_role: Vec<RoleAttendance>,
    /// The ten students with the highest all-time volume.
    pub top_performers: Vec<TopPerformer>,
}

/// A student's attendance totals over standard windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttendanceTotals {
    pub total: i64,
    pub today: i64,
    pub this_week: i64,
    pub this_month: i64,
}

/// Campus-wide dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_staff: i64,
    pub total_departments: i64,
    pub present_today: i64,
}

/// Serializable representation of a login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
