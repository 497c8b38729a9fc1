// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod enrollment;
mod state;
mod wake;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use enrollment::{EnrollmentPhase, EnrollmentStatus};
pub use state::{HardwareMode, HardwareState, StatusOutcome};
pub use wake::{MAGIC_PACKET_LEN, WAKE_PORT, magic_packet};
