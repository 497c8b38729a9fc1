// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types shared between the server handlers and their callers.

use campus_roll::{EnrollmentStatus, HardwareMode};
use campus_roll_persistence::{
    AttendanceData, AttendanceFilter, StudentAttendanceTotals, UserData,
};
use serde::{Deserialize, Serialize};

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub user_id: i64,
    pub name: String,
    pub role: String,
}

/// User registration request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub reg_no: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub batch_year: Option<String>,
    #[serde(default)]
    pub finger_id: Option<i64>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// When set, enrollment is activated for the assigned fingerprint slot
    /// as part of registration.
    #[serde(default)]
    pub enroll_now: bool,
}

/// A user as exposed over the wire. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub reg_no: String,
    pub role: String,
    pub department: Option<String>,
    pub batch_year: Option<String>,
    pub finger_id: Option<i64>,
    pub mac_address: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserData> for UserResponse {
    fn from(user: UserData) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            reg_no: user.reg_no,
            role: user.role,
            department: user.department,
            batch_year: user.batch_year,
            finger_id: user.finger_id,
            mac_address: user.mac_address,
            photo_path: user.photo_path,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: UserResponse,
    /// Whether enrollment was activated as part of registration.
    pub enrollment_started: bool,
}

/// Full-profile user update payload. Absent optional fields clear the
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub batch_year: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
}

/// Wake-on-LAN address assignment payload. `null` clears the address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMacRequest {
    pub mac_address: Option<String>,
}

/// Fingerprint slot assignment payload. `null` takes the next free slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignFingerprintRequest {
    #[serde(default)]
    pub finger_id: Option<i64>,
}

/// Query parameters for browsing the attendance log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub batch_year: Option<String>,
    #[serde(default)]
    pub reg_no: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl AttendanceQuery {
    /// Default page size when none is requested.
    pub const DEFAULT_PER_PAGE: i64 = 50;

    /// Converts the query into a persistence filter with pagination applied.
    #[must_use]
    pub fn to_filter(&self) -> AttendanceFilter {
        let per_page: i64 = self.per_page.unwrap_or(Self::DEFAULT_PER_PAGE).max(1);
        let page: i64 = self.page.unwrap_or(1).max(1);
        AttendanceFilter {
            date: self.date.clone(),
            department: self.department.clone(),
            batch_year: self.batch_year.clone(),
            reg_no: self.reg_no.clone(),
            limit: Some(per_page),
            offset: Some((page - 1) * per_page),
        }
    }

    /// The same filter without pagination, for counting and export.
    #[must_use]
    pub fn to_unpaginated_filter(&self) -> AttendanceFilter {
        AttendanceFilter {
            date: self.date.clone(),
            department: self.department.clone(),
            batch_year: self.batch_year.clone(),
            reg_no: self.reg_no.clone(),
            limit: None,
            offset: None,
        }
    }
}

/// Attendance listing response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceData>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Per-student attendance summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttendanceResponse {
    pub user: UserResponse,
    pub totals: StudentAttendanceTotals,
    pub records: Vec<AttendanceData>,
}

/// Query parameters for the recent-activity endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Department create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
    pub hod_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Department update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub hod_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The mode payload the reader polls for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeResponse {
    pub action: String,
    pub id: Option<i64>,
}

impl From<HardwareMode> for ModeResponse {
    fn from(mode: HardwareMode) -> Self {
        match mode {
            HardwareMode::Attendance => Self {
                action: String::from("attendance"),
                id: None,
            },
            HardwareMode::Enroll(finger_id) => Self {
                action: String::from("enroll"),
                id: Some(finger_id.value()),
            },
        }
    }
}

/// Enrollment progress as polled by the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentStatusResponse {
    pub status: String,
    pub finger_id: Option<i64>,
    pub message: String,
}

impl From<&EnrollmentStatus> for EnrollmentStatusResponse {
    fn from(status: &EnrollmentStatus) -> Self {
        Self {
            status: status.phase.as_status_str().to_string(),
            finger_id: status.finger_id.map(campus_roll_domain::FingerId::value),
            message: status.message.clone(),
        }
    }
}

/// Verification response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: String,
    pub name: String,
    pub reg_no: String,
    pub timestamp: String,
    /// Set when a Wake-on-LAN frame was attempted for the user's device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake: Option<String>,
}

/// Generic acknowledgement payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: String::from("ok"),
        }
    }
}
