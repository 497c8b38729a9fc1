// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use time::macros::format_description;

/// The timestamp layout used throughout the system (`YYYY-MM-DD HH:MM:SS`).
///
/// Attendance rows, session expiry, and audit-style `created_at` columns all
/// store this format so `SQLite`'s `DATE()` function can bucket them by day.
const TIMESTAMP_FORMAT: &[time::format_description::BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a timestamp in the system-wide `YYYY-MM-DD HH:MM:SS` layout.
///
/// Falls back to a debug rendering if formatting fails, which cannot happen
/// for a valid `OffsetDateTime` with this description.
#[must_use]
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| format!("{ts:?}"))
}

/// Parses a timestamp in the system-wide `YYYY-MM-DD HH:MM:SS` layout.
///
/// Stored timestamps are always UTC.
///
/// # Errors
///
/// Returns an error if the string does not match the layout.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    let parsed: time::PrimitiveDateTime = time::PrimitiveDateTime::parse(value, &TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::InvalidTimestamp(format!("'{value}': {e}")))?;
    Ok(parsed.assume_utc())
}

/// Integer handle correlating a fingerprint sensor template with a user.
///
/// The sensor stores biometric templates in numbered slots; this identifier
/// names the slot. Assigned by the system (`max + 1`) unless explicitly
/// provided at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerId(i64);

impl FingerId {
    /// Creates a finger identifier from a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not positive.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidFingerId(format!(
                "must be a positive integer, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FingerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A campus registration number.
///
/// Unique per user. Trimmed of surrounding whitespace; must be non-empty
/// and printable ASCII so it survives CSV export and URL paths unmangled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegNo(String);

impl RegNo {
    /// Maximum accepted length for a registration number.
    const MAX_LEN: usize = 32;

    /// Creates a registration number after validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty, too long, or contains
    /// non-printable or non-ASCII characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRegNo(String::from(
                "must not be empty",
            )));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidRegNo(format!(
                "must be at most {} characters, got {}",
                Self::MAX_LEN,
                trimmed.len()
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_graphic() || c == ' ')
        {
            return Err(DomainError::InvalidRegNo(String::from(
                "must contain only printable ASCII characters",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the registration number as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roles held by registered users.
///
/// Roles gate what a logged-in user may do. Students are registered for
/// attendance tracking only and cannot log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative authority: user registration, enrollment control,
    /// department management, deletions.
    Admin,
    /// Teaching staff: may browse and correct attendance logs.
    Staff,
    /// Head of department: staff privileges plus department dashboards.
    Hod,
    /// Student: tracked for attendance; has no login.
    Student,
}

impl Role {
    /// Converts this role to its canonical lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Hod => "hod",
            Self::Student => "student",
        }
    }

    /// Whether this role can authenticate at all.
    #[must_use]
    pub const fn can_log_in(self) -> bool {
        !matches!(self, Self::Student)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "hod" => Ok(Self::Hod),
            "student" => Ok(Self::Student),
            other => Err(DomainError::InvalidRole(format!(
                "'{other}' is not one of admin, staff, hod, student"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A student intake year, e.g. `2024`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchYear(String);

impl BatchYear {
    /// Creates a batch year after validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a four-digit year.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidBatchYear(format!(
                "expected a four-digit year, got '{trimmed}'"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the batch year as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BatchYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
