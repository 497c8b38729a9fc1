// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Campus Roll attendance system.
//!
//! This crate provides `SQLite` persistence for users, the attendance log,
//! departments, and login sessions. It is built on Diesel with embedded
//! migrations.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against unique in-memory databases
//! - Each in-memory database name is generated from an atomic counter, so
//!   tests are isolated without time-based collisions

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
#![allow(clippy::multiple_crate_versions)]

use campus_roll_domain::FingerId;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AttendanceData, AttendanceFilter, AttendanceStats, DailyAttendance, DashboardStats,
    DepartmentData, DepartmentStats, MonthlyAttendance, NewUser, RoleAttendance, SessionData,
    StudentAttendanceTotals, TopPerformer, UserData, UserUpdate,
};
pub use error::PersistenceError;

/// Persistence adapter for users, attendance, departments, and sessions.
///
/// Owns a single `SQLite` connection. Callers serialize access; the server
/// wraps this behind a mutex.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails, including a
    /// `UniqueConstraintViolation` when the registration number or
    /// fingerprint slot is already taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user)
    }

    /// Retrieves a user by internal ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the user
    /// is not found.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by registration number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the user
    /// is not found.
    pub fn get_user_by_reg_no(
        &mut self,
        reg_no: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_reg_no(&mut self.conn, reg_no)
    }

    /// Retrieves a user by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the user
    /// is not found.
    pub fn get_user_by_name(&mut self, name: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_name(&mut self.conn, name)
    }

    /// Retrieves the user who owns a fingerprint slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no user
    /// owns the slot.
    pub fn get_user_by_finger_id(
        &mut self,
        finger_id: FingerId,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_finger_id(&mut self.conn, finger_id.value())
    }

    /// Lists users, optionally restricted by role and department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(
        &mut self,
        role: Option<&str>,
        department: Option<&str>,
    ) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn, role, department)
    }

    /// Computes the next free fingerprint slot as `max(finger_id) + 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn next_finger_id(&mut self) -> Result<i64, PersistenceError> {
        queries::users::next_finger_id(&mut self.conn)
    }

    /// Replaces a user's editable profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no user has the given ID.
    pub fn update_user(
        &mut self,
        user_id: i64,
        update: &UserUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user(&mut self.conn, user_id, update)
    }

    /// Sets or clears a user's wake-up hardware address.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no user has the given ID.
    pub fn set_mac_address(
        &mut self,
        user_id: i64,
        mac_address: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_mac_address(&mut self.conn, user_id, mac_address)
    }

    /// Assigns a fingerprint slot to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails, no user has the given ID, or
    /// the slot is already taken.
    pub fn set_finger_id(
        &mut self,
        user_id: i64,
        finger_id: FingerId,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_finger_id(&mut self.conn, user_id, finger_id.value())
    }

    /// Clears a user's fingerprint slot.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no user has the given ID.
    pub fn clear_finger_id(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::clear_finger_id(&mut self.conn, user_id)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no user has the given ID.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    // ========================================================================
    // Attendance
    // ========================================================================

    /// Appends an attendance row.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[allow(clippy::too_many_arguments)]
    pub fn log_attendance(
        &mut self,
        name: &str,
        reg_no: &str,
        timestamp: &str,
        status: &str,
        department: Option<&str>,
        batch_year: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::attendance::log_attendance(
            &mut self.conn,
            name,
            reg_no,
            timestamp,
            status,
            department,
            batch_year,
        )
    }

    /// Lists attendance rows matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<Vec<AttendanceData>, PersistenceError> {
        queries::attendance::list_attendance(&mut self.conn, filter)
    }

    /// Counts attendance rows matching a filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_attendance(
        &mut self,
        filter: &AttendanceFilter,
    ) -> Result<i64, PersistenceError> {
        queries::attendance::count_attendance(&mut self.conn, filter)
    }

    /// Returns the most recent attendance rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_attendance(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AttendanceData>, PersistenceError> {
        queries::attendance::recent_attendance(&mut self.conn, limit)
    }

    /// Deletes an attendance row.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no row has the given ID.
    pub fn delete_attendance(&mut self, log_id: i64) -> Result<(), PersistenceError> {
        mutations::attendance::delete_attendance(&mut self.conn, log_id)
    }

    // ========================================================================
    // Departments
    // ========================================================================

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails, including a
    /// `UniqueConstraintViolation` when the name is already taken.
    pub fn create_department(
        &mut self,
        name: &str,
        hod_name: &str,
        description: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::departments::create_department(&mut self.conn, name, hod_name, description)
    }

    /// Retrieves a department by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// department is not found.
    pub fn get_department_by_name(
        &mut self,
        name: &str,
    ) -> Result<Option<DepartmentData>, PersistenceError> {
        queries::departments::get_department_by_name(&mut self.conn, name)
    }

    /// Lists all departments ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(&mut self) -> Result<Vec<DepartmentData>, PersistenceError> {
        queries::departments::list_departments(&mut self.conn)
    }

    /// Updates a department's head and description.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or no department has the
    /// given name.
    pub fn update_department(
        &mut self,
        name: &str,
        hod_name: &str,
        description: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::departments::update_department(&mut self.conn, name, hod_name, description)
    }

    /// Deletes a department and clears the department reference on any
    /// remaining users.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentHasStudents` if students are still assigned, or
    /// an error if persistence fails or no department has the given name.
    pub fn delete_department(&mut self, name: &str) -> Result<(), PersistenceError> {
        mutations::departments::delete_department(&mut self.conn, name)
    }

    /// Computes headcounts and today's presence for a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn department_stats(
        &mut self,
        name: &str,
        today: &str,
    ) -> Result<DepartmentStats, PersistenceError> {
        queries::departments::department_stats(&mut self.conn, name, today)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Computes the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn dashboard_stats(&mut self, today: &str) -> Result<DashboardStats, PersistenceError> {
        queries::stats::dashboard_stats(&mut self.conn, today)
    }

    /// Computes aggregated attendance analytics for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn attendance_stats(
        &mut self,
        today: &str,
        week_ago: &str,
    ) -> Result<AttendanceStats, PersistenceError> {
        queries::stats::attendance_stats(&mut self.conn, today, week_ago)
    }

    /// Computes per-month attendance volumes from a cutoff day onward.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn monthly_trends(
        &mut self,
        since: &str,
    ) -> Result<Vec<MonthlyAttendance>, PersistenceError> {
        queries::stats::monthly_trends(&mut self.conn, since)
    }

    /// Computes a student's attendance totals over the standard windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn student_attendance_totals(
        &mut self,
        reg_no: &str,
        today: &str,
        week_ago: &str,
        month_ago: &str,
    ) -> Result<StudentAttendanceTotals, PersistenceError> {
        queries::stats::student_attendance_totals(&mut self.conn, reg_no, today, week_ago, month_ago)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_session(
        &mut self,
        user_id: i64,
        session_token: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, user_id, session_token, expires_at)
    }

    /// Retrieves a session by its bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the token
    /// is unknown.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes the activity timestamp on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn touch_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::touch_session(&mut self.conn, session_token)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no session has the given token, or an
    /// error if persistence fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired before the given instant.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn prune_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::prune_expired_sessions(&mut self.conn, now)
    }
}
