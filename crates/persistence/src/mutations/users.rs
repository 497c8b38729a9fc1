// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewUser, UserUpdate};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Registers a new user.
///
/// # Returns
///
/// The internal ID assigned to the new user.
///
/// # Errors
///
/// Returns an error if the insert fails, including a
/// `UniqueConstraintViolation` when the registration number or fingerprint
/// slot is already taken.
pub fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, PersistenceError> {
    info!(
        "Creating user with reg_no: {}, role: {}",
        user.reg_no, user.role
    );

    diesel::insert_into(users::table)
        .values((
            users::name.eq(&user.name),
            users::reg_no.eq(&user.reg_no),
            users::role.eq(&user.role),
            users::department.eq(&user.department),
            users::batch_year.eq(&user.batch_year),
            users::finger_id.eq(user.finger_id),
            users::mac_address.eq(&user.mac_address),
            users::password_hash.eq(&user.password_hash),
            users::photo_path.eq(&user.photo_path),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}

/// Replaces a user's editable profile fields.
///
/// `None` fields clear the stored value. The fingerprint slot and password
/// are managed through their own mutations.
///
/// # Errors
///
/// Returns an error if the update fails or no user has the given ID.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &UserUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating user ID: {}", user_id);

    let affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::name.eq(&update.name),
            users::role.eq(&update.role),
            users::department.eq(&update.department),
            users::batch_year.eq(&update.batch_year),
            users::mac_address.eq(&update.mac_address),
            users::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    Ok(())
}

/// Sets or clears a user's wake-up hardware address.
///
/// # Errors
///
/// Returns an error if the update fails or no user has the given ID.
pub fn set_mac_address(
    conn: &mut SqliteConnection,
    user_id: i64,
    mac_address: Option<&str>,
) -> Result<(), PersistenceError> {
    debug!("Setting mac_address for user ID: {}", user_id);

    let affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::mac_address.eq(mac_address),
            users::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    Ok(())
}

/// Assigns a fingerprint slot to a user.
///
/// # Errors
///
/// Returns an error if the update fails, no user has the given ID, or the
/// slot is already taken (`UniqueConstraintViolation`).
pub fn set_finger_id(
    conn: &mut SqliteConnection,
    user_id: i64,
    finger_id: i64,
) -> Result<(), PersistenceError> {
    info!("Assigning finger_id {} to user ID: {}", finger_id, user_id);

    let affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::finger_id.eq(finger_id),
            users::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    Ok(())
}

/// Clears a user's fingerprint slot.
///
/// # Errors
///
/// Returns an error if the update fails or no user has the given ID.
pub fn clear_finger_id(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Clearing finger_id for user ID: {}", user_id);

    let affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set((
            users::finger_id.eq(None::<i64>),
            users::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    Ok(())
}

/// Deletes a user. Sessions for the user are removed by the cascade.
///
/// # Errors
///
/// Returns an error if the delete fails or no user has the given ID.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting user ID: {}", user_id);

    let affected: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }

    Ok(())
}
