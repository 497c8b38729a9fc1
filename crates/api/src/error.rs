// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use campus_roll_domain::DomainError;
use campus_roll_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the user does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueConstraintViolation(message) => Self::DomainRuleViolation {
                rule: String::from("unique_constraint"),
                message,
            },
            PersistenceError::DepartmentHasStudents {
                name,
                student_count,
            } => Self::DomainRuleViolation {
                rule: String::from("department_has_students"),
                message: format!(
                    "Department '{name}' still has {student_count} student(s) assigned"
                ),
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            _ => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFingerId(msg) => ApiError::InvalidInput {
            field: String::from("finger_id"),
            message: msg,
        },
        DomainError::InvalidRegNo(msg) => ApiError::InvalidInput {
            field: String::from("reg_no"),
            message: msg,
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidMacAddress(msg) => ApiError::InvalidInput {
            field: String::from("mac_address"),
            message: msg,
        },
        DomainError::InvalidBatchYear(msg) => ApiError::InvalidInput {
            field: String::from("batch_year"),
            message: msg,
        },
        DomainError::InvalidTimestamp(msg) => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: msg,
        },
        DomainError::DuplicateRegNo { reg_no } => ApiError::DomainRuleViolation {
            rule: String::from("unique_reg_no"),
            message: format!("Registration number '{reg_no}' is already in use"),
        },
        DomainError::DuplicateFingerId { finger_id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_finger_id"),
            message: format!("Finger identifier {finger_id} is already in use"),
        },
        DomainError::DuplicateDepartment { name } => ApiError::DomainRuleViolation {
            rule: String::from("unique_department"),
            message: format!("Department '{name}' already exists"),
        },
        DomainError::FingerIdNotFound { finger_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Fingerprint"),
            message: format!("No user registered for finger identifier {finger_id}"),
        },
        DomainError::UserNotFound { user_id } => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        },
        DomainError::DepartmentNotFound { name } => ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department '{name}' does not exist"),
        },
        DomainError::DepartmentHasStudents {
            name,
            student_count,
        } => ApiError::DomainRuleViolation {
            rule: String::from("department_has_students"),
            message: format!("Department '{name}' still has {student_count} student(s) assigned"),
        },
    }
}
