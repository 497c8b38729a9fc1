// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    user_id: i64,
    name: String,
    reg_no: String,
    role: String,
    department: Option<String>,
    batch_year: Option<String>,
    finger_id: Option<i64>,
    mac_address: Option<String>,
    password_hash: Option<String>,
    created_at: String,
    updated_at: String,
    photo_path: Option<String>,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            name: row.name,
            reg_no: row.reg_no,
            role: row.role,
            department: row.department,
            batch_year: row.batch_year,
            finger_id: row.finger_id,
            mac_address: row.mac_address,
            password_hash: row.password_hash,
            photo_path: row.photo_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a user by internal ID.
///
/// Returns `Ok(None)` if the user is not found.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by registration number.
///
/// Returns `Ok(None)` if the user is not found.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_reg_no(
    conn: &mut SqliteConnection,
    reg_no: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by reg_no: {}", reg_no);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::reg_no.eq(reg_no))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a user by login name.
///
/// Returns `Ok(None)` if the user is not found.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by name: {}", name);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::name.eq(name))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the user who owns a fingerprint slot.
///
/// Returns `Ok(None)` if no user owns the slot.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_user_by_finger_id(
    conn: &mut SqliteConnection,
    finger_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!("Looking up user by finger_id: {}", finger_id);

    let result: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::finger_id.eq(finger_id))
        .select(UserRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists users, optionally restricted by role and department.
///
/// Results are ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(
    conn: &mut SqliteConnection,
    role: Option<&str>,
    department: Option<&str>,
) -> Result<Vec<UserData>, PersistenceError> {
    let mut query = users::table.into_boxed();

    if let Some(role) = role {
        query = query.filter(users::role.eq(role.to_string()));
    }
    if let Some(department) = department {
        query = query.filter(users::department.eq(department.to_string()));
    }

    let rows: Vec<UserRow> = query
        .order(users::name.asc())
        .select(UserRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Computes the next free fingerprint slot as `max(finger_id) + 1`.
///
/// Returns 1 when no slots are assigned yet.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn next_finger_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let max: Option<i64> = users::table
        .select(diesel::dsl::max(users::finger_id))
        .first(conn)?;

    Ok(max.unwrap_or(0) + 1)
}
