// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance verification and log browsing services.

use campus_roll_domain::{DomainError, FingerId, MacAddress, format_timestamp};
use campus_roll_persistence::{AttendanceData, AttendanceFilter, Persistence, UserData};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{ApiError, translate_domain_error};

/// The status written for every successful verification.
pub const PRESENT: &str = "Present";

/// The result of a successful verification push.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// The user the fingerprint resolved to.
    pub user: UserData,
    /// The attendance row that was appended.
    pub log_id: i64,
    /// The server-generated timestamp on the row.
    pub timestamp: String,
    /// The user's wake-up target, if one is registered.
    pub wake_target: Option<MacAddress>,
}

/// Resolves a fingerprint match and appends an attendance record.
///
/// The attendance write commits before any wake attempt; the caller sends
/// the Wake-on-LAN frame (if `wake_target` is set) only after this returns.
/// There is no dedup window: repeated verifications each append a row.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no user owns the fingerprint slot; no
/// record is written in that case.
pub fn verify_fingerprint(
    persistence: &mut Persistence,
    finger_id: FingerId,
) -> Result<VerificationOutcome, ApiError> {
    let user: UserData = persistence.get_user_by_finger_id(finger_id)?.ok_or_else(|| {
        warn!("Verification push for unknown finger_id {}", finger_id);
        translate_domain_error(DomainError::FingerIdNotFound {
            finger_id: finger_id.value(),
        })
    })?;

    let timestamp: String = format_timestamp(OffsetDateTime::now_utc());

    let log_id: i64 = persistence.log_attendance(
        &user.name,
        &user.reg_no,
        &timestamp,
        PRESENT,
        user.department.as_deref(),
        user.batch_year.as_deref(),
    )?;

    info!(
        "Attendance recorded for '{}' ({}) at {}",
        user.name, user.reg_no, timestamp
    );

    let wake_target: Option<MacAddress> = user
        .mac_address
        .as_deref()
        .and_then(|raw| raw.parse().ok());

    Ok(VerificationOutcome {
        user,
        log_id,
        timestamp,
        wake_target,
    })
}

/// Lists attendance rows matching a filter along with the unpaginated total.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn browse_attendance(
    persistence: &mut Persistence,
    filter: &AttendanceFilter,
) -> Result<(Vec<AttendanceData>, i64), ApiError> {
    let records: Vec<AttendanceData> = persistence.list_attendance(filter)?;
    let total: i64 = persistence.count_attendance(filter)?;
    Ok((records, total))
}

/// Returns the most recent attendance rows.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn recent_attendance(
    persistence: &mut Persistence,
    limit: i64,
) -> Result<Vec<AttendanceData>, ApiError> {
    Ok(persistence.recent_attendance(limit.clamp(1, 100))?)
}

/// Deletes an attendance row.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no row has the given ID.
pub fn delete_attendance(persistence: &mut Persistence, log_id: i64) -> Result<(), ApiError> {
    persistence.delete_attendance(log_id)?;
    Ok(())
}
