// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance report export.

use campus_roll_persistence::AttendanceData;

use crate::error::ApiError;

/// Renders attendance rows as a CSV document.
///
/// Column order matches the browse view: log ID, name, registration
/// number, timestamp, status, department, batch year.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn attendance_csv(records: &[AttendanceData]) -> Result<String, ApiError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());

    writer
        .write_record([
            "log_id",
            "name",
            "reg_no",
            "timestamp",
            "status",
            "department",
            "batch_year",
        ])
        .map_err(|e| ApiError::Internal {
            message: format!("CSV write failed: {e}"),
        })?;

    for record in records {
        writer
            .write_record([
                record.log_id.to_string().as_str(),
                &record.name,
                &record.reg_no,
                &record.timestamp,
                &record.status,
                record.department.as_deref().unwrap_or(""),
                record.batch_year.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("CSV write failed: {e}"),
            })?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("CSV write failed: {e}"),
    })?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}
