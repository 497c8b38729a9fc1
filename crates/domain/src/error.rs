// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A finger identifier was outside the valid range.
    InvalidFingerId(String),
    /// A registration number failed validation.
    InvalidRegNo(String),
    /// A role string was not one of the known roles.
    InvalidRole(String),
    /// A MAC address string could not be parsed.
    InvalidMacAddress(String),
    /// A batch year failed validation.
    InvalidBatchYear(String),
    /// A timestamp string did not match the system layout.
    InvalidTimestamp(String),
    /// A user with the given registration number already exists.
    DuplicateRegNo {
        /// The colliding registration number.
        reg_no: String,
    },
    /// A user with the given finger identifier already exists.
    DuplicateFingerId {
        /// The colliding finger identifier.
        finger_id: i64,
    },
    /// A department with the given name already exists.
    DuplicateDepartment {
        /// The colliding department name.
        name: String,
    },
    /// No user owns the given finger identifier.
    FingerIdNotFound {
        /// The finger identifier that was looked up.
        finger_id: i64,
    },
    /// The requested user was not found.
    UserNotFound {
        /// The user's internal identifier.
        user_id: i64,
    },
    /// The requested department was not found.
    DepartmentNotFound {
        /// The department name that was looked up.
        name: String,
    },
    /// A department still has students assigned and cannot be deleted.
    DepartmentHasStudents {
        /// The department name.
        name: String,
        /// The number of students still assigned.
        student_count: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFingerId(msg) => write!(f, "Invalid finger identifier: {msg}"),
            Self::InvalidRegNo(msg) => write!(f, "Invalid registration number: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidMacAddress(msg) => write!(f, "Invalid MAC address: {msg}"),
            Self::InvalidBatchYear(msg) => write!(f, "Invalid batch year: {msg}"),
            Self::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {msg}"),
            Self::DuplicateRegNo { reg_no } => {
                write!(f, "Registration number '{reg_no}' is already in use")
            }
            Self::DuplicateFingerId { finger_id } => {
                write!(f, "Finger identifier {finger_id} is already in use")
            }
            Self::DuplicateDepartment { name } => {
                write!(f, "Department '{name}' already exists")
            }
            Self::FingerIdNotFound { finger_id } => {
                write!(f, "No user registered for finger identifier {finger_id}")
            }
            Self::UserNotFound { user_id } => write!(f, "User {user_id} not found"),
            Self::DepartmentNotFound { name } => {
                write!(f, "Department '{name}' not found")
            }
            Self::DepartmentHasStudents {
                name,
                student_count,
            } => {
                write!(
                    f,
                    "Department '{name}' still has {student_count} student(s) and cannot be deleted"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
