// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_roll_domain::FingerId;

/// A phase of the multi-step fingerprint capture exchange.
///
/// The reader pushes phase strings as it walks the operator through a
/// two-scan capture. Phases the system does not recognize are preserved
/// verbatim so a firmware update cannot silently drop progress reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentPhase {
    /// No enrollment in progress.
    Idle,
    /// Enrollment activated; waiting for the reader to pick it up.
    Pending,
    /// The reader has begun the capture exchange.
    Started,
    /// Waiting for the first finger placement.
    WaitingFinger1,
    /// First scan captured.
    GotFinger1,
    /// Operator must lift the finger between scans.
    RemoveFinger,
    /// Waiting for the second placement of the same finger.
    WaitingFinger2,
    /// Second scan captured.
    GotFinger2,
    /// The reader is building the template.
    Processing,
    /// Terminal: the template was stored on the sensor.
    Success,
    /// Terminal: capture failed.
    Failed,
    /// An unrecognized phase string, passed through verbatim.
    Other(String),
}

impl EnrollmentPhase {
    /// Parses a phase from the raw status string pushed by the reader.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status {
            "idle" => Self::Idle,
            "pending" => Self::Pending,
            "started" => Self::Started,
            "waiting_finger_1" => Self::WaitingFinger1,
            "got_finger_1" => Self::GotFinger1,
            "remove_finger" => Self::RemoveFinger,
            "waiting_finger_2" => Self::WaitingFinger2,
            "got_finger_2" => Self::GotFinger2,
            "processing" => Self::Processing,
            "success" => Self::Success,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire representation of this phase.
    #[must_use]
    pub fn as_status_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Started => "started",
            Self::WaitingFinger1 => "waiting_finger_1",
            Self::GotFinger1 => "got_finger_1",
            Self::RemoveFinger => "remove_finger",
            Self::WaitingFinger2 => "waiting_finger_2",
            Self::GotFinger2 => "got_finger_2",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Other(raw) => raw,
        }
    }

    /// The operator-facing message for this phase.
    ///
    /// Unknown phases echo their raw status string so the browser still
    /// shows something meaningful.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Pending => String::from("Waiting for reader..."),
            Self::Started => String::from("Enrollment started"),
            Self::WaitingFinger1 => String::from("Place finger on sensor..."),
            Self::GotFinger1 => String::from("First scan complete! Remove finger"),
            Self::RemoveFinger => String::from("Remove finger from sensor"),
            Self::WaitingFinger2 => String::from("Place the SAME finger again..."),
            Self::GotFinger2 => String::from("Second scan complete!"),
            Self::Processing => String::from("Processing fingerprint..."),
            Self::Success => String::from("Enrollment successful!"),
            Self::Failed => String::from("Enrollment failed. Please try again."),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Whether this phase ends the capture exchange.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// The current enrollment progress as last reported.
///
/// Replaced wholesale on every update; there is no history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentStatus {
    /// The current phase.
    pub phase: EnrollmentPhase,
    /// The finger identifier the report refers to, if any.
    pub finger_id: Option<FingerId>,
    /// The operator-facing message for the current phase.
    pub message: String,
}

impl EnrollmentStatus {
    /// The status when no enrollment is in progress.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            phase: EnrollmentPhase::Idle,
            finger_id: None,
            message: String::new(),
        }
    }

    /// The status immediately after enrollment is activated, before the
    /// reader has pushed its first report.
    #[must_use]
    pub fn pending(finger_id: FingerId) -> Self {
        Self {
            message: EnrollmentPhase::Pending.message(),
            phase: EnrollmentPhase::Pending,
            finger_id: Some(finger_id),
        }
    }
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        Self::idle()
    }
}
