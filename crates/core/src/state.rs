// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::enrollment::{EnrollmentPhase, EnrollmentStatus};
use campus_roll_domain::FingerId;

/// The mode the fingerprint reader should operate in.
///
/// The reader polls for this and switches behavior accordingly:
/// verification scans in `Attendance`, the capture exchange in `Enroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareMode {
    /// Normal operation: scans are matched against stored templates.
    Attendance,
    /// The reader should capture a new template into the given slot.
    Enroll(FingerId),
}

/// The result of applying a status report to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// A non-terminal report; enrollment continues.
    Updated,
    /// A terminal report for the active enrollment; the mode has reverted
    /// to attendance.
    Completed {
        /// The finger identifier the enrollment was for.
        finger_id: FingerId,
        /// Whether the template was stored.
        success: bool,
    },
    /// A terminal report for a finger identifier that is not the active
    /// enrollment. The state is unchanged.
    Rejected {
        /// The currently active enrollment, if any.
        active: Option<FingerId>,
    },
}

/// The complete hardware-facing state: current mode plus the latest
/// enrollment progress report.
///
/// One instance exists per process, behind the server's shared mutex. All
/// transitions go through the methods here; fields are read-only outside
/// the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareState {
    mode: HardwareMode,
    enrollment: EnrollmentStatus,
}

impl HardwareState {
    /// Creates the initial state: attendance mode, no enrollment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: HardwareMode::Attendance,
            enrollment: EnrollmentStatus::idle(),
        }
    }

    /// The current mode, as polled by the reader.
    #[must_use]
    pub const fn mode(&self) -> HardwareMode {
        self.mode
    }

    /// The latest enrollment progress report.
    #[must_use]
    pub const fn enrollment(&self) -> &EnrollmentStatus {
        &self.enrollment
    }

    /// Activates enrollment for a finger identifier.
    ///
    /// Valid from any state; an in-progress enrollment is superseded. The
    /// enrollment status becomes `pending` until the reader picks the
    /// request up.
    pub fn activate_enroll(&mut self, finger_id: FingerId) {
        self.mode = HardwareMode::Enroll(finger_id);
        self.enrollment = EnrollmentStatus::pending(finger_id);
    }

    /// Cancels any enrollment and returns to attendance mode.
    ///
    /// Unconditional. The reader observes the mode change on its next poll
    /// and abandons the capture exchange.
    pub fn cancel_enroll(&mut self) {
        self.mode = HardwareMode::Attendance;
        self.enrollment = EnrollmentStatus::idle();
    }

    /// Applies a status report pushed by the reader.
    ///
    /// Non-terminal reports replace the enrollment status and leave the
    /// mode alone. Terminal reports (`success`, `failed`) additionally
    /// revert to attendance mode, but only when the reported finger
    /// identifier matches the active enrollment; a terminal report for any
    /// other identifier is rejected without touching the state.
    pub fn record_status(&mut self, status: &str, finger_id: FingerId) -> StatusOutcome {
        let phase: EnrollmentPhase = EnrollmentPhase::from_status(status);

        if phase.is_terminal() {
            let active: Option<FingerId> = match self.mode {
                HardwareMode::Enroll(active) => Some(active),
                HardwareMode::Attendance => None,
            };
            if active != Some(finger_id) {
                return StatusOutcome::Rejected { active };
            }
            let success: bool = phase == EnrollmentPhase::Success;
            self.enrollment = EnrollmentStatus {
                message: phase.message(),
                phase,
                finger_id: Some(finger_id),
            };
            self.mode = HardwareMode::Attendance;
            return StatusOutcome::Completed { finger_id, success };
        }

        self.enrollment = EnrollmentStatus {
            message: phase.message(),
            phase,
            finger_id: Some(finger_id),
        };
        StatusOutcome::Updated
    }
}

impl Default for HardwareState {
    fn default() -> Self {
        Self::new()
    }
}
